pub mod category_select;
pub mod search_input;
pub mod theme;

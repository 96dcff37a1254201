use iced::widget::pick_list;
use iced::Element;

use crate::app::Message;
use crate::search::Category;

/// Build the category selector. `None` when the URL holds a category we don't offer.
pub fn view(selected: Option<Category>) -> Element<'static, Message> {
    pick_list(Category::ALL, selected, Message::CategorySelected)
        .placeholder("Category")
        .padding(10)
        .text_size(16)
        .into()
}

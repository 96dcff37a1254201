use iced::widget::text_input;
use iced::{Element, Fill};

use crate::app::Message;
use crate::ui::theme;

/// The search input ID for focus management
pub const SEARCH_INPUT_ID: &str = "filterbar-search-input";

/// Build the search input widget
pub fn view<'a>(placeholder: &'a str, value: &'a str) -> Element<'a, Message> {
    text_input(placeholder, value)
        .on_input(Message::InputChanged)
        .id(SEARCH_INPUT_ID)
        .padding(10)
        .size(16)
        .width(Fill)
        .style(theme::search_input)
        .into()
}

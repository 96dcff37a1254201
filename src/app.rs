use std::sync::Arc;
use std::time::Duration;

use iced::widget::{column, container, row, text};
use iced::{Alignment, Element, Fill, Padding, Subscription, Task, Theme};
use tokio::runtime::Handle;

use crate::config::Config;
use crate::location::Location;
use crate::router::{MemoryRouter, Navigator};
use crate::search::{Category, SearchControl};
use crate::ui::{category_select, search_input, theme};

/// Magnifying glass shown in front of the input
const SEARCH_ICON: &str = "\u{1F50D}";

pub struct State {
    config: Config,
    router: MemoryRouter,
    control: SearchControl,
    /// Text input value; the URL catches up once typing pauses
    input: String,
    /// Location as of the last router change we saw
    location: Location,
    seen_version: u64,
}

#[derive(Debug, Clone)]
pub enum Message {
    InputChanged(String),
    CategorySelected(Category),
    /// Poll the router for navigations made by the debounced search
    RouterTick,
}

impl State {
    /// `runtime` hosts the debounce timers and must outlive the state.
    pub fn new(config: Config, router: MemoryRouter, runtime: Handle) -> (Self, Task<Message>) {
        let control =
            SearchControl::new(Arc::new(router.clone()), config.search.delay(), runtime);
        let input = control.initial_query();
        let location = router.location();
        let seen_version = router.version();

        tracing::info!(
            "Mounted at {} (category={}, debounce={:?})",
            location,
            control.selected_category(),
            control.delay()
        );

        let state = Self {
            config,
            router,
            control,
            input,
            location,
            seen_version,
        };

        (state, iced::widget::operation::focus(search_input::SEARCH_INPUT_ID))
    }

    pub fn title(&self) -> String {
        format!("Filterbar: {}", self.location)
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::InputChanged(value) => {
                self.input = value.clone();
                self.control.on_input(value);
                Task::none()
            }
            Message::CategorySelected(category) => {
                self.control.handle_category_change(category.as_str());
                self.refresh_location();
                Task::none()
            }
            Message::RouterTick => {
                self.refresh_location();
                Task::none()
            }
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let icon = text(SEARCH_ICON).size(16).style(theme::icon);
        let input = search_input::view(&self.config.search.placeholder, &self.input);
        let select = category_select::view(self.control.selected_option());

        let bar = row![icon, input, select]
            .spacing(8)
            .align_y(Alignment::Center);
        let url = text(self.location.href()).size(12).style(theme::url_text);

        let content = column![bar, url].spacing(8).padding(Padding::new(12.0));

        container(content)
            .width(Fill)
            .height(Fill)
            .style(theme::main_container)
            .into()
    }

    pub fn subscription(&self) -> Subscription<Message> {
        iced::time::every(Duration::from_millis(16)).map(|_| Message::RouterTick)
    }

    pub fn theme(&self) -> Theme {
        Theme::Dark
    }

    fn refresh_location(&mut self) {
        let version = self.router.version();
        if version != self.seen_version {
            self.seen_version = version;
            self.location = self.router.location();
            tracing::debug!("Location changed: {}", self.location);
        }
    }
}

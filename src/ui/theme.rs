use iced::widget::{container, text, text_input};
use iced::{Border, Color, Shadow, Theme};

/// Dark background color for the filter bar window
pub const BACKGROUND: Color = Color {
    r: 0.11,
    g: 0.12,
    b: 0.14,
    a: 1.0,
};

/// Slightly lighter surface color for the search input
const SURFACE: Color = Color {
    r: 0.18,
    g: 0.18,
    b: 0.22,
    a: 1.0,
};

/// Accent color for the focused input
const ACCENT: Color = Color {
    r: 0.35,
    g: 0.55,
    b: 0.85,
    a: 1.0,
};

/// Text color
const TEXT_PRIMARY: Color = Color {
    r: 0.9,
    g: 0.9,
    b: 0.92,
    a: 1.0,
};

const TEXT_SECONDARY: Color = Color {
    r: 0.55,
    g: 0.55,
    b: 0.6,
    a: 1.0,
};

/// Style for the main container wrapping the whole bar
pub fn main_container(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(BACKGROUND.into()),
        border: Border {
            color: Color {
                r: 0.3,
                g: 0.3,
                b: 0.35,
                a: 0.5,
            },
            width: 1.0,
            radius: 10.0.into(),
        },
        shadow: Shadow {
            color: Color::BLACK,
            offset: iced::Vector::new(0.0, 2.0),
            blur_radius: 12.0,
        },
        text_color: Some(TEXT_PRIMARY),
        snap: false,
    }
}

/// Style for the search text input
pub fn search_input(_theme: &Theme, status: text_input::Status) -> text_input::Style {
    let focused = matches!(status, text_input::Status::Focused { .. });
    text_input::Style {
        background: SURFACE.into(),
        border: Border {
            color: if focused { ACCENT } else { Color::TRANSPARENT },
            width: if focused { 2.0 } else { 0.0 },
            radius: 8.0.into(),
        },
        icon: TEXT_SECONDARY,
        placeholder: TEXT_SECONDARY,
        value: TEXT_PRIMARY,
        selection: Color { a: 0.3, ..ACCENT },
    }
}

/// Style for the decorative search icon
pub fn icon(_theme: &Theme) -> text::Style {
    text::Style {
        color: Some(TEXT_SECONDARY),
    }
}

/// Style for the current-URL line under the bar
pub fn url_text(_theme: &Theme) -> text::Style {
    text::Style {
        color: Some(Color {
            a: 0.8,
            ..ACCENT
        }),
    }
}

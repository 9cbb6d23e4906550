//! Theme system for TUI colors and styles
//!
//! Colors match the CLI output in `display`.

use iocraft::prelude::Color;

/// Theme configuration for TUI components
#[derive(Debug, Clone)]
pub struct Theme {
    // Result status colors
    pub loading: Color,
    pub error: Color,
    pub type_title: Color,

    // UI colors
    pub border: Color,
    pub border_focused: Color,
    pub background: Color,
    pub text: Color,
    pub text_dimmed: Color,
    pub highlight: Color,
    pub selected_background: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            loading: Color::Yellow,
            error: Color::Red,
            type_title: Color::Cyan,

            border: Color::Rgb {
                r: 120,
                g: 120,
                b: 120,
            },
            border_focused: Color::Blue,
            background: Color::Reset,
            text: Color::White,
            text_dimmed: Color::Rgb {
                r: 120,
                g: 120,
                b: 120,
            },
            highlight: Color::Blue,
            selected_background: Color::Rgb {
                r: 40,
                g: 40,
                b: 80,
            },
        }
    }
}

/// Global theme instance
pub static THEME: std::sync::LazyLock<Theme> = std::sync::LazyLock::new(Theme::default);

/// Get a reference to the global theme
pub fn theme() -> &'static Theme {
    &THEME
}

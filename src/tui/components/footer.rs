//! Keyboard shortcuts bar component
//!
//! Displays available keyboard shortcuts at the bottom of the screen.

use iocraft::prelude::*;

use super::shortcuts::ShortcutsBuilder;
use crate::tui::theme::theme;

/// A single keyboard shortcut entry
#[derive(Debug, Clone)]
pub struct Shortcut {
    /// The key or key combination (e.g., "Esc", "C-q", "Tab")
    pub key: String,
    /// Description of the action (e.g., "Clear", "Quit")
    pub action: String,
}

impl Shortcut {
    pub fn new(key: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            action: action.into(),
        }
    }
}

#[derive(Default, Props)]
pub struct FooterProps {
    pub shortcuts: Vec<Shortcut>,
}

/// Keyboard shortcuts bar at the bottom of the screen
#[component]
pub fn Footer(props: &FooterProps) -> impl Into<AnyElement<'static>> {
    let theme = theme();

    element! {
        View(
            width: 100pct,
            min_height: 1,
            flex_direction: FlexDirection::Row,
            flex_wrap: FlexWrap::Wrap,
            flex_shrink: 0.0,
            padding_left: 1,
            padding_right: 1,
            column_gap: 2,
            background_color: theme.border,
        ) {
            #(props.shortcuts.iter().map(|shortcut| {
                element! {
                    View(flex_direction: FlexDirection::Row) {
                        Text(
                            content: format!("[{}]", shortcut.key),
                            color: theme.highlight,
                            weight: Weight::Bold,
                        )
                        Text(
                            content: format!(" {}", shortcut.action),
                            color: theme.text,
                        )
                    }
                }
            }))
        }
    }
}

/// Shortcuts while the input has focus
pub fn input_shortcuts(has_results: bool) -> Vec<Shortcut> {
    let builder = if has_results {
        ShortcutsBuilder::new().with_selection()
    } else {
        ShortcutsBuilder::new()
    };
    builder.with_clear().with_focus(true).with_quit().build()
}

/// Shortcuts while the input is blurred
pub fn blurred_shortcuts() -> Vec<Shortcut> {
    ShortcutsBuilder::new()
        .with_focus(false)
        .add("q", "Quit")
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_shortcuts_hide_selection_without_results() {
        let idle = input_shortcuts(false);
        let open = input_shortcuts(true);

        assert!(!idle.iter().any(|s| s.key == "Enter"));
        assert!(open.iter().any(|s| s.key == "Enter"));
        assert!(open.iter().any(|s| s.key == "Esc"));
    }

    #[test]
    fn test_blurred_shortcuts() {
        let shortcuts = blurred_shortcuts();
        assert_eq!(shortcuts.len(), 2);
        assert_eq!(shortcuts[0].action, "Focus");
    }
}

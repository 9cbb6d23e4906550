//! Search input component
//!
//! A bordered text input with a prompt prefix, placeholder text shown
//! whenever the input is empty, and a loading indicator on the right.

use iocraft::prelude::*;

use crate::tui::model::show_placeholder;
use crate::tui::theme::theme;

#[derive(Default, Props)]
pub struct SearchBoxProps {
    /// State for the input value
    pub value: Option<State<String>>,
    /// Whether the input has focus
    pub has_focus: bool,
    /// Shown while the input is empty
    pub placeholder: String,
    /// Whether a request is in flight
    pub loading: bool,
}

/// Search input with prompt and loading indicator
#[component]
pub fn SearchBox(props: &SearchBoxProps) -> impl Into<AnyElement<'static>> {
    let theme = theme();
    let border_color = if props.has_focus {
        theme.border_focused
    } else {
        theme.border
    };

    let Some(mut value) = props.value else {
        return element! {
            View(
                flex_direction: FlexDirection::Row,
                border_style: BorderStyle::Round,
                border_color: border_color,
                padding_left: 1,
                padding_right: 1,
                height: 3,
            ) {
                Text(content: "No value state provided", color: theme.text_dimmed)
            }
        };
    };

    // While empty the input keeps one cell for the caret and the
    // placeholder fills the rest
    let empty = show_placeholder(&value.read());

    element! {
        View(
            flex_direction: FlexDirection::Row,
            border_style: BorderStyle::Round,
            border_color: border_color,
            padding_left: 1,
            padding_right: 1,
            height: 3,
        ) {
            View(margin_right: 1) {
                Text(content: ">", color: theme.text_dimmed)
            }
            #(if empty {
                Some(element! {
                    View(flex_grow: 1.0, flex_direction: FlexDirection::Row) {
                        View(width: 1) {
                            TextInput(
                                value: String::new(),
                                has_focus: props.has_focus,
                                on_change: move |new_value| value.set(new_value),
                                color: theme.text,
                            )
                        }
                        Text(content: props.placeholder.clone(), color: theme.text_dimmed)
                    }
                })
            } else {
                Some(element! {
                    View(flex_grow: 1.0) {
                        TextInput(
                            value: value.to_string(),
                            has_focus: props.has_focus,
                            on_change: move |new_value| value.set(new_value),
                            color: theme.text,
                        )
                    }
                })
            })
            #(if props.loading {
                Some(element! {
                    View(margin_left: 1) {
                        Text(content: "searching...", color: theme.loading)
                    }
                })
            } else {
                None
            })
        }
    }
}

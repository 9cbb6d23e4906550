//! Result dropdown component
//!
//! Renders the widget's result status: a hint while closed, a loading line,
//! the error text, "No results", or the result rows with the cursor row
//! highlighted.

use iocraft::prelude::*;

use crate::tui::model::closed_hint;
use crate::tui::theme::theme;
use crate::types::SearchResult;
use crate::widget::ResultStatus;

#[derive(Default, Props)]
pub struct ResultListProps {
    pub status: ResultStatus,
    /// Whether the dropdown is open (input focused and not idle)
    pub open: bool,
    pub selected_index: usize,
    /// Row under the pointer, if any
    pub hovered: Option<usize>,
    /// First visible result index
    pub scroll_offset: usize,
    /// Number of rows that fit between the borders
    pub visible_height: usize,
}

#[component]
pub fn ResultList(props: &ResultListProps) -> impl Into<AnyElement<'static>> {
    let theme = theme();
    let border_color = if props.open {
        theme.border_focused
    } else {
        theme.border
    };

    let message: Option<(String, Color)> = match &props.status {
        status if !props.open => Some((closed_hint(status).to_string(), theme.text_dimmed)),
        ResultStatus::Idle | ResultStatus::Pending => None,
        ResultStatus::Loading => Some(("Searching...".to_string(), theme.loading)),
        ResultStatus::Failed(failure) => Some((failure.to_string(), theme.error)),
        ResultStatus::Ready(results) if results.is_empty() => {
            Some(("No results".to_string(), theme.text_dimmed))
        }
        ResultStatus::Ready(_) => None,
    };

    if let Some((content, color)) = message {
        return element! {
            View(
                width: 100pct,
                height: 100pct,
                flex_direction: FlexDirection::Column,
                border_style: BorderStyle::Round,
                border_color: border_color,
                padding_left: 1,
            ) {
                Text(content: content, color: color)
            }
        };
    }

    let results: &[SearchResult] = match &props.status {
        ResultStatus::Ready(results) => results,
        _ => &[],
    };
    let start = props.scroll_offset.min(results.len());
    let end = (start + props.visible_height).min(results.len());

    element! {
        View(
            width: 100pct,
            height: 100pct,
            flex_direction: FlexDirection::Column,
            border_style: BorderStyle::Round,
            border_color: border_color,
        ) {
            #(results[start..end].iter().map(|result| {
                element! {
                    ResultRow(
                        result: result.clone(),
                        is_selected: result.id == props.selected_index,
                        is_hovered: props.hovered == Some(result.id),
                    )
                }
            }))
        }
    }
}

#[derive(Default, Props)]
pub struct ResultRowProps {
    pub result: SearchResult,
    pub is_selected: bool,
    pub is_hovered: bool,
}

/// One result: type title column then label
#[component]
pub fn ResultRow(props: &ResultRowProps) -> impl Into<AnyElement<'static>> {
    let theme = theme();

    let background = if props.is_selected {
        Some(theme.selected_background)
    } else {
        None
    };
    let indicator = if props.is_selected {
        ">"
    } else if props.is_hovered {
        "*"
    } else {
        " "
    };

    element! {
        View(
            height: 1,
            width: 100pct,
            flex_direction: FlexDirection::Row,
            padding_left: 1,
            padding_right: 1,
            background_color: background,
        ) {
            View(width: 2, flex_shrink: 0.0) {
                Text(content: indicator, color: theme.highlight, weight: Weight::Bold)
            }
            View(width: 12, flex_shrink: 0.0) {
                Text(content: props.result.type_title.clone(), color: theme.type_title)
            }
            View(flex_grow: 1.0) {
                Text(content: props.result.label.clone(), color: theme.text)
            }
        }
    }
}

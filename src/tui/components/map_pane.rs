//! Map pane component
//!
//! Stands in for the host map: shows the committed result, the result
//! under the pointer, and the most recent host notifications.

use iocraft::prelude::*;

use crate::tui::model::MapState;
use crate::tui::theme::theme;
use crate::types::SearchResult;

#[derive(Default, Props)]
pub struct MapPaneProps {
    pub map: MapState,
}

#[component]
pub fn MapPane(props: &MapPaneProps) -> impl Into<AnyElement<'static>> {
    let theme = theme();
    let map = &props.map;

    element! {
        View(
            width: 100pct,
            height: 100pct,
            flex_direction: FlexDirection::Column,
            border_style: BorderStyle::Round,
            border_color: theme.border,
            padding_left: 1,
            padding_right: 1,
        ) {
            Text(content: "Map", color: theme.text, weight: Weight::Bold)
            ResultSummary(heading: "Focused", result: map.focused.clone())
            ResultSummary(heading: "Highlighted", result: map.highlighted.clone())
            View(margin_top: 1, flex_direction: FlexDirection::Column) {
                Text(content: "Events", color: theme.text_dimmed)
                #(map.recent_events().map(|line| element! {
                    Text(content: line.to_string(), color: theme.text_dimmed)
                }))
            }
        }
    }
}

#[derive(Default, Props)]
struct ResultSummaryProps {
    heading: &'static str,
    result: Option<SearchResult>,
}

#[component]
fn ResultSummary(props: &ResultSummaryProps) -> impl Into<AnyElement<'static>> {
    let theme = theme();

    let body = match &props.result {
        Some(result) => format!("{} ({})", result.label, result.type_title),
        None => "-".to_string(),
    };

    element! {
        View(flex_direction: FlexDirection::Row, margin_top: 1) {
            View(width: 13, flex_shrink: 0.0) {
                Text(content: format!("{}:", props.heading), color: theme.text_dimmed)
            }
            Text(content: body, color: theme.text)
        }
    }
}

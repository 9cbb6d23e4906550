//! Interactive geosearch browser (`geosearch browse`)
//!
//! A search box with a live result dropdown on the left and a map stand-in
//! on the right that receives the widget's host notifications.

use iocraft::prelude::*;

use crate::config::SearchConfig;
use crate::error::SearchFailure;
use crate::host::HostEvent;
use crate::pipeline::{
    CycleCancel, DEBOUNCE, PipelineEvent, PipelineEventKind, SearchTicket, run_ticket_until,
};
use crate::provider::HttpSearchProvider;
use crate::tui::components::{
    Footer, MapPane, ResultList, SearchBox, blurred_shortcuts, input_shortcuts,
};
use crate::tui::model::{
    BrowserAction, MapState, key_action, release_hover, row_at, scroll_offset, visible_rows,
};
use crate::tui::theme::theme;
use crate::widget::{QueryUpdate, ResultStatus, SearchWidget};

#[derive(Default, Props)]
pub struct GeoSearchBrowserProps {
    pub config: SearchConfig,
    /// `None` when the HTTP client could not be built; every search fails
    pub provider: Option<HttpSearchProvider>,
    /// Initial input text
    pub search_terms: String,
}

/// Layout:
/// ```text
/// +------------------------------------------+
/// | SearchBox                                 |
/// +--------------------+---------------------+
/// | ResultList         | MapPane             |
/// |                    |                     |
/// +--------------------+---------------------+
/// | Footer                                    |
/// +------------------------------------------+
/// ```
#[component]
pub fn GeoSearchBrowser<'a>(
    props: &GeoSearchBrowserProps,
    mut hooks: Hooks,
) -> impl Into<AnyElement<'a>> {
    let (width, height) = hooks.use_terminal_size();
    let mut system = hooks.use_context_mut::<SystemContext>();

    let mut widget: State<SearchWidget> = hooks.use_state({
        let config = props.config.clone();
        move || {
            let mut widget = SearchWidget::new(&config);
            widget.focus_in();
            widget
        }
    });
    let mut input = hooks.use_state(String::new);
    let mut map: State<MapState> = hooks.use_state(MapState::default);
    let mut hovered: State<Option<usize>> = hooks.use_state(|| None);
    let mut should_exit = hooks.use_state(|| false);
    let cycles = hooks.use_state(CycleCancel::new).read().clone();

    // Runs one debounce cycle until the next query change, select or clear
    // cancels it, so at most one request is in flight.
    let search_handler: Handler<SearchTicket> = hooks.use_async_handler({
        let widget_setter = widget;
        let config = props.config.clone();
        let provider = props.provider.clone();
        let cycles = cycles.clone();

        move |ticket: SearchTicket| {
            let mut widget_setter = widget_setter;
            let config = config.clone();
            let provider = provider.clone();
            let cycles = cycles.clone();

            async move {
                let generation = widget_setter.read().generation();
                let emit = |event| {
                    widget_setter.write().apply(event);
                };
                match provider {
                    Some(provider) => {
                        run_ticket_until(
                            &cycles,
                            &provider,
                            &config,
                            ticket,
                            DEBOUNCE,
                            &generation,
                            emit,
                        )
                        .await;
                    }
                    None => {
                        let mut emit = emit;
                        emit(PipelineEvent {
                            generation: ticket.generation,
                            kind: PipelineEventKind::Failed(SearchFailure::network(
                                "HTTP client unavailable",
                            )),
                        });
                    }
                }
            }
        }
    });

    // Seed the input once from the command line
    let mut seeded = hooks.use_state(|| false);
    if !seeded.get() {
        seeded.set(true);
        input.set(props.search_terms.clone());
    }

    // Input text drives the widget; text written back by select/clear
    // already matches and schedules nothing.
    let input_text = input.to_string();
    if input_text != widget.read().query() {
        cycles.cancel_all();
        let update = widget.write().update_query(input_text);
        let mut pointer = hovered.get();
        if let Some(event) = release_hover(&mut pointer, &widget.read()) {
            hovered.set(pointer);
            event.notify(&mut *map.write());
        }
        if let QueryUpdate::Schedule(ticket) = update {
            search_handler.clone()(ticket);
        }
    }

    let visible = visible_rows(height);
    let (open, status, selected, focused, placeholder, result_count) = {
        let widget = widget.read();
        (
            widget.is_open(),
            widget.status().clone(),
            widget.selected_index(),
            widget.is_focused(),
            widget.placeholder().to_string(),
            widget.result_count(),
        )
    };
    let offset = scroll_offset(selected, visible);

    hooks.use_terminal_events(move |event| match event {
        TerminalEvent::Key(KeyEvent {
            code,
            kind,
            modifiers,
            ..
        }) if kind != KeyEventKind::Release => {
            let focused = widget.read().is_focused();
            match key_action(code, modifiers, focused) {
                Some(BrowserAction::Quit) => should_exit.set(true),
                Some(BrowserAction::ToggleFocus) => {
                    let mut widget = widget.write();
                    if widget.is_focused() {
                        widget.focus_out();
                    } else {
                        widget.focus_in();
                    }
                }
                Some(BrowserAction::Widget(key)) => {
                    let event = widget.write().handle_key(key);
                    if let Some(event) = event {
                        if matches!(event, HostEvent::Select(_) | HostEvent::Cleared) {
                            cycles.cancel_all();
                            input.set(widget.read().query().to_string());
                            hovered.set(None);
                        }
                        event.notify(&mut *map.write());
                    }
                }
                None => {}
            }
        }
        TerminalEvent::FullscreenMouse(mouse_event) => {
            let row = if open {
                row_at(mouse_event.row, offset, visible, result_count)
            } else {
                None
            };
            match mouse_event.kind {
                MouseEventKind::Moved => {
                    if row == hovered.get() {
                        return;
                    }
                    hovered.set(row);
                    let event = match row {
                        Some(index) => widget.read().hover(index),
                        None => Some(widget.read().hover_out()),
                    };
                    if let Some(event) = event {
                        event.notify(&mut *map.write());
                    }
                }
                MouseEventKind::Down(_) => {
                    if let Some(index) = row {
                        let event = widget.write().select(index);
                        if let Some(event) = event {
                            cycles.cancel_all();
                            input.set(widget.read().query().to_string());
                            hovered.set(None);
                            event.notify(&mut *map.write());
                        }
                    }
                }
                _ => {}
            }
        }
        _ => {}
    });

    if should_exit.get() {
        system.exit();
    }

    let theme = theme();
    let shortcuts = if focused {
        input_shortcuts(result_count > 0)
    } else {
        blurred_shortcuts()
    };
    let map_snapshot = map.read().clone();

    element! {
        View(
            width,
            height,
            flex_direction: FlexDirection::Column,
            background_color: theme.background,
        ) {
            SearchBox(
                value: Some(input),
                has_focus: focused,
                placeholder: placeholder,
                loading: status == ResultStatus::Loading,
            )
            View(
                flex_grow: 1.0,
                flex_direction: FlexDirection::Row,
                width: 100pct,
            ) {
                View(width: 55pct, height: 100pct) {
                    ResultList(
                        status: status,
                        open: open,
                        selected_index: selected,
                        hovered: hovered.get(),
                        scroll_offset: offset,
                        visible_height: visible,
                    )
                }
                View(flex_grow: 1.0, height: 100pct) {
                    MapPane(map: map_snapshot)
                }
            }
            Footer(shortcuts: shortcuts)
        }
    }
}

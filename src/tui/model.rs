//! Pure browser logic: key mapping, pointer hit-testing and the map
//! stand-in that receives host notifications.
//!
//! Kept free of iocraft state so it can be unit tested.

use std::collections::VecDeque;

use iocraft::prelude::{KeyCode, KeyModifiers};

use crate::host::{HostEvent, SearchHost};
use crate::types::SearchResult;
use crate::widget::{ResultStatus, SearchWidget, WidgetKey};

/// Terminal row of the first result: search box (3 rows) plus the list's
/// top border.
pub const RESULTS_TOP: u16 = 4;

/// Rows taken by everything except result rows: search box, list borders
/// and footer.
pub const CHROME_HEIGHT: u16 = 6;

/// Event lines kept in the map pane
const EVENT_HISTORY: usize = 8;

/// What a key press means to the browser
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowserAction {
    Widget(WidgetKey),
    ToggleFocus,
    Quit,
}

/// Map a key press given whether the input has focus.
///
/// While focused, printable characters belong to the text input, so only
/// Ctrl+q quits.
pub fn key_action(code: KeyCode, modifiers: KeyModifiers, focused: bool) -> Option<BrowserAction> {
    match code {
        KeyCode::Char('q') if modifiers.contains(KeyModifiers::CONTROL) => {
            Some(BrowserAction::Quit)
        }
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
            Some(BrowserAction::Quit)
        }
        KeyCode::Tab => Some(BrowserAction::ToggleFocus),
        KeyCode::Char('q') if !focused => Some(BrowserAction::Quit),
        KeyCode::Char('/') if !focused => Some(BrowserAction::ToggleFocus),
        _ if !focused => None,
        KeyCode::Up => Some(BrowserAction::Widget(WidgetKey::Up)),
        KeyCode::Down => Some(BrowserAction::Widget(WidgetKey::Down)),
        KeyCode::Enter => Some(BrowserAction::Widget(WidgetKey::Enter)),
        KeyCode::Esc => Some(BrowserAction::Widget(WidgetKey::Escape)),
        _ => None,
    }
}

/// Result rows that fit in a terminal of the given height.
pub fn visible_rows(terminal_height: u16) -> usize {
    terminal_height.saturating_sub(CHROME_HEIGHT) as usize
}

/// First visible result so that `selected` stays on screen.
pub fn scroll_offset(selected: usize, visible: usize) -> usize {
    if visible == 0 {
        return 0;
    }
    selected.saturating_sub(visible - 1)
}

/// Result index under a pointer at terminal row `row`.
pub fn row_at(row: u16, offset: usize, visible: usize, count: usize) -> Option<usize> {
    let line = row.checked_sub(RESULTS_TOP)? as usize;
    if line >= visible {
        return None;
    }
    let index = offset + line;
    (index < count).then_some(index)
}

/// Drop the hovered row after the query text changed under the pointer.
///
/// The rows it pointed at are gone, so the host gets a hover-out when one
/// was highlighted.
pub fn release_hover(hovered: &mut Option<usize>, widget: &SearchWidget) -> Option<HostEvent> {
    hovered.take().map(|_| widget.hover_out())
}

/// The placeholder shows whenever the input is empty, focused or not.
pub fn show_placeholder(value: &str) -> bool {
    value.is_empty()
}

/// Line shown in place of a closed dropdown.
pub fn closed_hint(status: &ResultStatus) -> &'static str {
    match status {
        ResultStatus::Idle => "Type at least 3 characters to search",
        _ => "Press Tab to show results",
    }
}

/// Host state shown in the map pane.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MapState {
    /// Last committed result; the map would zoom here
    pub focused: Option<SearchResult>,
    /// Result under the pointer; the map would outline it
    pub highlighted: Option<SearchResult>,
    events: VecDeque<String>,
}

impl MapState {
    /// Notification lines, newest first.
    pub fn recent_events(&self) -> impl Iterator<Item = &str> {
        self.events.iter().rev().map(String::as_str)
    }

    fn record(&mut self, line: String) {
        if self.events.len() == EVENT_HISTORY {
            self.events.pop_front();
        }
        self.events.push_back(line);
    }
}

impl SearchHost for MapState {
    fn on_select(&mut self, result: &SearchResult) {
        tracing::info!(label = %result.label, kind = %result.result_type, "result selected");
        self.record(format!("select {}", result.label));
        self.focused = Some(result.clone());
        self.highlighted = None;
    }

    fn on_hover_result(&mut self, result: &SearchResult) {
        self.record(format!("hover {}", result.label));
        self.highlighted = Some(result.clone());
    }

    fn on_hover_out(&mut self) {
        self.record("hover out".to_string());
        self.highlighted = None;
    }

    fn on_clear(&mut self) {
        self.record("clear".to_string());
        self.focused = None;
        self.highlighted = None;
    }
}

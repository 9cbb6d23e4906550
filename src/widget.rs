//! Search widget state machine.
//!
//! [`SearchWidget`] owns everything the dropdown renders: the query text,
//! the result status, the selection cursor and focus. It performs no I/O;
//! query changes come back as [`QueryUpdate`]s for the pipeline and user
//! actions come back as [`HostEvent`]s for the host application.

use crate::config::SearchConfig;
use crate::error::SearchFailure;
use crate::host::HostEvent;
use crate::pipeline::{Generation, MIN_QUERY_CHARS, PipelineEvent, PipelineEventKind, SearchTicket};
use crate::types::SearchResult;

/// What the dropdown currently shows
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ResultStatus {
    /// Nothing to show: empty or too-short input, or after select/clear
    #[default]
    Idle,
    /// Waiting out the debounce window
    Pending,
    /// Request in flight
    Loading,
    /// Latest results; may be empty ("no matches")
    Ready(Vec<SearchResult>),
    /// The latest request failed
    Failed(SearchFailure),
}

/// Result of a query change
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryUpdate {
    /// Input too short; outstanding work should be cancelled
    Idle,
    /// Start a debounce cycle for this ticket
    Schedule(SearchTicket),
}

/// Keys the widget reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetKey {
    Enter,
    Up,
    Down,
    Escape,
}

impl WidgetKey {
    /// Map a DOM key code.
    pub fn from_key_code(code: u32) -> Option<Self> {
        match code {
            13 => Some(WidgetKey::Enter),
            38 => Some(WidgetKey::Up),
            40 => Some(WidgetKey::Down),
            27 => Some(WidgetKey::Escape),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SearchWidget {
    query: String,
    status: ResultStatus,
    selected: usize,
    focused: bool,
    placeholder: String,
    generation: Generation,
}

impl SearchWidget {
    pub fn new(config: &SearchConfig) -> Self {
        Self {
            placeholder: config.search_placeholder.clone(),
            ..Default::default()
        }
    }

    /// Handle to the cycle counter, shared with the pipeline.
    pub fn generation(&self) -> Generation {
        self.generation.clone()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn status(&self) -> &ResultStatus {
        &self.status
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.status, ResultStatus::Loading)
    }

    /// Current results; empty unless the latest request succeeded.
    pub fn results(&self) -> &[SearchResult] {
        match &self.status {
            ResultStatus::Ready(results) => results,
            _ => &[],
        }
    }

    pub fn result_count(&self) -> usize {
        self.results().len()
    }

    pub fn has_results(&self) -> bool {
        self.result_count() > 0
    }

    pub fn selected_result(&self) -> Option<&SearchResult> {
        self.results().get(self.selected)
    }

    /// Whether the dropdown should be drawn.
    pub fn is_open(&self) -> bool {
        self.focused && self.status != ResultStatus::Idle
    }

    /// Replace the query text and start a new cycle.
    ///
    /// Every call invalidates the previous cycle, including calls that
    /// leave the input too short to search.
    pub fn update_query(&mut self, text: impl Into<String>) -> QueryUpdate {
        self.query = text.into();
        self.selected = 0;
        let generation = self.generation.advance();

        if self.query.chars().count() < MIN_QUERY_CHARS {
            self.status = ResultStatus::Idle;
            return QueryUpdate::Idle;
        }

        self.status = ResultStatus::Pending;
        QueryUpdate::Schedule(SearchTicket {
            generation,
            query: self.query.clone(),
        })
    }

    /// Apply a pipeline event. Returns `false` when the event belongs to a
    /// superseded cycle and was dropped.
    pub fn apply(&mut self, event: PipelineEvent) -> bool {
        if !self.generation.is_current(event.generation) {
            tracing::debug!(generation = event.generation, "ignoring superseded pipeline event");
            return false;
        }

        match event.kind {
            PipelineEventKind::Loading => self.status = ResultStatus::Loading,
            PipelineEventKind::Results(results) => {
                self.status = ResultStatus::Ready(results);
                self.selected = 0;
            }
            PipelineEventKind::Failed(failure) => {
                self.status = ResultStatus::Failed(failure);
                self.selected = 0;
            }
        }
        true
    }

    /// React to a key press.
    pub fn handle_key(&mut self, key: WidgetKey) -> Option<HostEvent> {
        match key {
            WidgetKey::Up => {
                if self.has_results() {
                    self.selected = self.selected.saturating_sub(1);
                }
                None
            }
            WidgetKey::Down => {
                let count = self.result_count();
                if count > 0 {
                    self.selected = (self.selected + 1).min(count - 1);
                }
                None
            }
            WidgetKey::Enter => self.select(self.selected),
            WidgetKey::Escape => Some(self.clear()),
        }
    }

    /// Commit the result at `index` (keyboard Enter or a click on a row).
    ///
    /// The input takes the result's label without starting a new search.
    pub fn select(&mut self, index: usize) -> Option<HostEvent> {
        let result = self.results().get(index).cloned()?;

        self.generation.advance();
        self.query = result.label.clone();
        self.status = ResultStatus::Idle;
        self.selected = 0;
        self.focused = false;

        Some(HostEvent::Select(result))
    }

    /// Clear the input and results and blur.
    pub fn clear(&mut self) -> HostEvent {
        self.generation.advance();
        self.query.clear();
        self.status = ResultStatus::Idle;
        self.selected = 0;
        self.focused = false;
        HostEvent::Cleared
    }

    /// Mouse entered a result row. The cursor does not move.
    pub fn hover(&self, index: usize) -> Option<HostEvent> {
        self.results()
            .get(index)
            .cloned()
            .map(HostEvent::HoverResult)
    }

    pub fn hover_out(&self) -> HostEvent {
        HostEvent::HoverOut
    }

    pub fn focus_in(&mut self) {
        self.focused = true;
    }

    pub fn focus_out(&mut self) {
        self.focused = false;
    }
}

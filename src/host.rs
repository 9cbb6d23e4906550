//! Host-facing contract.
//!
//! The host application (a map view, the terminal browser, a test) learns
//! about user actions through [`SearchHost`] callbacks. [`GeoSearch`] wires
//! a [`SearchWidget`] to a [`SearchPipeline`] and a host so callers only
//! deal in keystrokes and pointer events.

use std::sync::Arc;
use std::time::Duration;

use crate::config::SearchConfig;
use crate::pipeline::SearchPipeline;
use crate::provider::SearchProvider;
use crate::types::SearchResult;
use crate::widget::{QueryUpdate, SearchWidget, WidgetKey};

/// Notifications sent to the host. All callbacks are fire-and-forget.
pub trait SearchHost {
    /// A result was committed with Enter or a click
    fn on_select(&mut self, _result: &SearchResult) {}
    /// The pointer entered a result row
    fn on_hover_result(&mut self, _result: &SearchResult) {}
    /// The pointer left the result rows
    fn on_hover_out(&mut self) {}
    /// The input was cleared with Escape
    fn on_clear(&mut self) {}
}

impl SearchHost for () {}

/// A notification produced by the widget
#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    Select(SearchResult),
    HoverResult(SearchResult),
    HoverOut,
    Cleared,
}

impl HostEvent {
    /// Deliver this event to the matching host callback.
    pub fn notify<H: SearchHost + ?Sized>(&self, host: &mut H) {
        match self {
            HostEvent::Select(result) => host.on_select(result),
            HostEvent::HoverResult(result) => host.on_hover_result(result),
            HostEvent::HoverOut => host.on_hover_out(),
            HostEvent::Cleared => host.on_clear(),
        }
    }
}

/// A widget, its pipeline and its host.
pub struct GeoSearch<P, H> {
    widget: SearchWidget,
    pipeline: SearchPipeline<P>,
    host: H,
}

impl<P, H> GeoSearch<P, H>
where
    P: SearchProvider + 'static,
    H: SearchHost,
{
    pub fn new(provider: P, config: SearchConfig, host: H) -> Self {
        let widget = SearchWidget::new(&config);
        let pipeline =
            SearchPipeline::new(Arc::new(provider), Arc::new(config), widget.generation());
        Self {
            widget,
            pipeline,
            host,
        }
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.pipeline = self.pipeline.with_debounce(debounce);
        self
    }

    /// Seed the input, as the `searchTerms` argument does.
    pub fn with_search_terms(mut self, terms: &str) -> Self {
        self.set_query(terms);
        self
    }

    pub fn widget(&self) -> &SearchWidget {
        &self.widget
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    /// Replace the query text. Must be called within a tokio runtime.
    pub fn set_query(&mut self, text: &str) {
        match self.widget.update_query(text) {
            QueryUpdate::Idle => self.pipeline.cancel(),
            QueryUpdate::Schedule(ticket) => self.pipeline.schedule(ticket),
        }
    }

    pub fn press(&mut self, key: WidgetKey) {
        if let Some(event) = self.widget.handle_key(key) {
            self.dispatch(event);
        }
    }

    /// Press a key by DOM key code; unknown codes are ignored.
    pub fn press_code(&mut self, code: u32) {
        if let Some(key) = WidgetKey::from_key_code(code) {
            self.press(key);
        }
    }

    /// Commit the result at `index`, as a click on its row.
    pub fn select(&mut self, index: usize) {
        if let Some(event) = self.widget.select(index) {
            self.dispatch(event);
        }
    }

    pub fn hover(&mut self, index: usize) {
        if let Some(event) = self.widget.hover(index) {
            event.notify(&mut self.host);
        }
    }

    pub fn hover_out(&mut self) {
        self.widget.hover_out().notify(&mut self.host);
    }

    pub fn focus_in(&mut self) {
        self.widget.focus_in();
    }

    pub fn focus_out(&mut self) {
        self.widget.focus_out();
    }

    /// Wait for and apply the next pipeline event.
    ///
    /// Returns `false` when no work is outstanding.
    pub async fn pump(&mut self) -> bool {
        match self.pipeline.next_event().await {
            Some(event) => {
                self.widget.apply(event);
                true
            }
            None => false,
        }
    }

    /// Pump until the pipeline is idle.
    pub async fn settle(&mut self) {
        while self.pump().await {}
    }

    fn dispatch(&mut self, event: HostEvent) {
        // Selecting or clearing ends the cycle, stop any outstanding work
        self.pipeline.cancel();
        event.notify(&mut self.host);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use serde_json::{Value, json};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use url::Url;

    #[derive(Default)]
    struct Recorder {
        events: Vec<String>,
    }

    impl SearchHost for Recorder {
        fn on_select(&mut self, result: &SearchResult) {
            self.events.push(format!("select:{}", result.label));
        }
        fn on_hover_result(&mut self, result: &SearchResult) {
            self.events.push(format!("hover:{}", result.label));
        }
        fn on_hover_out(&mut self) {
            self.events.push("hover-out".to_string());
        }
        fn on_clear(&mut self) {
            self.events.push("clear".to_string());
        }
    }

    #[derive(Default)]
    struct StaticProvider {
        calls: Arc<AtomicUsize>,
    }

    impl SearchProvider for StaticProvider {
        async fn search(&self, _url: &Url) -> Result<Vec<Value>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![
                json!({"type": "lot", "label": "123 Broadway"}),
                json!({"type": "street", "label": "Broadway"}),
            ])
        }
    }

    #[test]
    fn test_notify_dispatches_to_callbacks() {
        let result = SearchResult {
            id: 0,
            result_type: "lot".to_string(),
            label: "1 Centre St".to_string(),
            type_title: "Lot".to_string(),
            extra: Default::default(),
        };
        let mut host = Recorder::default();
        HostEvent::HoverResult(result.clone()).notify(&mut host);
        HostEvent::HoverOut.notify(&mut host);
        HostEvent::Select(result).notify(&mut host);
        HostEvent::Cleared.notify(&mut host);
        assert_eq!(
            host.events,
            vec!["hover:1 Centre St", "hover-out", "select:1 Centre St", "clear"]
        );
    }

    #[test]
    fn test_unit_host_ignores_everything() {
        HostEvent::Cleared.notify(&mut ());
    }

    #[tokio::test(start_paused = true)]
    async fn test_session_select_flow() {
        let mut search = GeoSearch::new(
            StaticProvider::default(),
            SearchConfig::default(),
            Recorder::default(),
        );
        search.focus_in();
        search.set_query("broadway");
        search.settle().await;

        assert_eq!(search.widget().result_count(), 2);
        search.hover(1);
        search.hover_out();
        search.press(WidgetKey::Down);
        search.press_code(13);

        assert_eq!(search.widget().query(), "Broadway");
        assert!(search.widget().results().is_empty());
        assert_eq!(
            search.host().events,
            vec!["hover:Broadway", "hover-out", "select:Broadway"]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_session_short_query_never_fetches() {
        let provider = StaticProvider::default();
        let calls = Arc::clone(&provider.calls);
        let mut search = GeoSearch::new(provider, SearchConfig::default(), ());
        search.set_query("br");
        search.settle().await;

        assert!(search.widget().results().is_empty());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_session_escape_clears_and_notifies() {
        let mut search = GeoSearch::new(
            StaticProvider::default(),
            SearchConfig::default(),
            Recorder::default(),
        )
        .with_search_terms("broadway");
        search.settle().await;
        assert!(search.widget().has_results());

        search.press(WidgetKey::Escape);

        assert_eq!(search.widget().query(), "");
        assert!(search.widget().results().is_empty());
        assert_eq!(search.into_host().events, vec!["clear"]);
    }
}

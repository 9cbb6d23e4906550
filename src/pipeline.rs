//! Debounced keep-latest search pipeline.
//!
//! Every query change starts a new cycle stamped with the next [`Generation`]
//! value. A cycle sleeps for the debounce window, fetches, annotates and
//! publishes a [`PipelineEvent`]. Starting a cycle aborts the previous task,
//! and every completion is checked against the current generation before it
//! is published, so a response that loses the race is dropped even when the
//! transport could not be cancelled in time.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::{Notify, mpsc};
use tokio::task::JoinHandle;

use crate::config::SearchConfig;
use crate::error::SearchFailure;
use crate::provider::{SearchProvider, annotate_results};
use crate::types::SearchResult;

/// Quiet period before a query is sent.
pub const DEBOUNCE: Duration = Duration::from_millis(100);

/// Queries shorter than this (in characters) never reach the network.
pub const MIN_QUERY_CHARS: usize = 3;

/// Shared cycle counter. Cloning shares the counter.
#[derive(Debug, Clone, Default)]
pub struct Generation(Arc<AtomicU64>);

impl Generation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> u64 {
        self.0.load(Ordering::SeqCst)
    }

    /// Start a new cycle, invalidating every earlier one.
    pub fn advance(&self) -> u64 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.current() == generation
    }
}

/// A query accepted for fetching, tagged with its cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    pub generation: u64,
    pub query: String,
}

/// Output of one pipeline cycle
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineEvent {
    pub generation: u64,
    pub kind: PipelineEventKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PipelineEventKind {
    /// The debounce window elapsed and the request was sent
    Loading,
    /// Annotated results, replacing the previous set wholesale
    Results(Vec<SearchResult>),
    /// The request or its body failed
    Failed(SearchFailure),
}

/// Body of one debounce cycle.
///
/// Hosts with their own executor (the terminal UI) call this directly; the
/// [`SearchPipeline`] spawns it on tokio. `emit` is only ever called while
/// `ticket` is still the current generation.
pub async fn run_ticket<P, F>(
    provider: &P,
    config: &SearchConfig,
    ticket: SearchTicket,
    debounce: Duration,
    generation: &Generation,
    mut emit: F,
) where
    P: SearchProvider,
    F: FnMut(PipelineEvent),
{
    tokio::time::sleep(debounce).await;
    if !generation.is_current(ticket.generation) {
        tracing::debug!(query = %ticket.query, "query superseded during debounce");
        return;
    }

    let event = |kind| PipelineEvent {
        generation: ticket.generation,
        kind,
    };

    let url = match config.endpoint_url(&ticket.query) {
        Ok(url) => url,
        Err(e) => {
            emit(event(PipelineEventKind::Failed(SearchFailure::from(&e))));
            return;
        }
    };

    emit(event(PipelineEventKind::Loading));

    let outcome = provider
        .search(&url)
        .await
        .and_then(|raw| annotate_results(raw, config));

    // Checked at completion, not at send time
    if !generation.is_current(ticket.generation) {
        tracing::debug!(query = %ticket.query, "dropping superseded response");
        return;
    }

    let kind = match outcome {
        Ok(results) => {
            tracing::debug!(query = %ticket.query, count = results.len(), "search completed");
            PipelineEventKind::Results(results)
        }
        Err(e) => {
            tracing::warn!(query = %ticket.query, "search failed: {e}");
            PipelineEventKind::Failed(SearchFailure::from(&e))
        }
    };
    emit(event(kind));
}

/// Interrupts cycles run with [`run_ticket_until`]. Cloning shares the signal.
///
/// For hosts that drive cycles on their own executor and cannot abort a
/// task handle.
#[derive(Debug, Clone, Default)]
pub struct CycleCancel(Arc<Notify>);

impl CycleCancel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop every cycle currently waiting or fetching.
    pub fn cancel_all(&self) {
        self.0.notify_waiters();
    }
}

/// [`run_ticket`] that stops at the next [`CycleCancel::cancel_all`].
///
/// The cycle future is dropped on cancellation, which also drops its HTTP
/// request. Returns `false` when the cycle was cancelled.
pub async fn run_ticket_until<P, F>(
    cancel: &CycleCancel,
    provider: &P,
    config: &SearchConfig,
    ticket: SearchTicket,
    debounce: Duration,
    generation: &Generation,
    emit: F,
) -> bool
where
    P: SearchProvider,
    F: FnMut(PipelineEvent),
{
    let query = ticket.query.clone();
    tokio::select! {
        _ = cancel.0.notified() => {
            tracing::debug!(query = %query, "search cycle cancelled");
            false
        }
        _ = run_ticket(provider, config, ticket, debounce, generation, emit) => true,
    }
}

/// Spawns at most one live debounce cycle at a time on the tokio runtime.
pub struct SearchPipeline<P> {
    provider: Arc<P>,
    config: Arc<SearchConfig>,
    generation: Generation,
    debounce: Duration,
    task: Option<JoinHandle<()>>,
    sender: mpsc::UnboundedSender<PipelineEvent>,
    receiver: mpsc::UnboundedReceiver<PipelineEvent>,
}

impl<P: SearchProvider + 'static> SearchPipeline<P> {
    pub fn new(provider: Arc<P>, config: Arc<SearchConfig>, generation: Generation) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self {
            provider,
            config,
            generation,
            debounce: DEBOUNCE,
            task: None,
            sender,
            receiver,
        }
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Start a cycle for `ticket`, dropping whatever was outstanding.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule(&mut self, ticket: SearchTicket) {
        self.cancel();
        tracing::debug!(generation = ticket.generation, query = %ticket.query, "scheduling search");

        let provider = Arc::clone(&self.provider);
        let config = Arc::clone(&self.config);
        let generation = self.generation.clone();
        let sender = self.sender.clone();
        let debounce = self.debounce;

        self.task = Some(tokio::spawn(async move {
            run_ticket(
                provider.as_ref(),
                &config,
                ticket,
                debounce,
                &generation,
                |event| {
                    let _ = sender.send(event);
                },
            )
            .await;
        }));
    }

    /// Abort the outstanding cycle, if any.
    pub fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    /// Whether a cycle is still running.
    pub fn is_busy(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Next event, waiting on the outstanding cycle if needed.
    ///
    /// Returns `None` once nothing is queued and no cycle is running.
    pub async fn next_event(&mut self) -> Option<PipelineEvent> {
        if let Ok(event) = self.receiver.try_recv() {
            return Some(event);
        }

        let task = self.task.as_mut()?;
        tokio::select! {
            biased;
            event = self.receiver.recv() => return event,
            _ = task => {}
        }

        self.task = None;
        self.receiver.try_recv().ok()
    }
}

impl<P> Drop for SearchPipeline<P> {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

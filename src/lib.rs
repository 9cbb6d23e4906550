pub mod commands;
pub mod config;
pub mod display;
pub mod error;
pub mod host;
pub mod pipeline;
pub mod provider;
pub mod tui;
pub mod types;
pub mod widget;

pub use config::SearchConfig;
pub use error::{FailureKind, GeosearchError, Result, SearchFailure};
pub use host::{GeoSearch, HostEvent, SearchHost};
pub use pipeline::{
    CycleCancel, DEBOUNCE, Generation, MIN_QUERY_CHARS, PipelineEvent, PipelineEventKind,
    SearchPipeline, SearchTicket, run_ticket, run_ticket_until,
};
pub use provider::{HttpSearchProvider, SearchProvider, annotate_results};
pub use types::SearchResult;
pub use widget::{QueryUpdate, ResultStatus, SearchWidget, WidgetKey};

//! Interactive browser command (`geosearch browse`)

use iocraft::prelude::*;

use crate::config::SearchConfig;
use crate::error::{GeosearchError, Result};
use crate::provider::HttpSearchProvider;
use crate::tui::GeoSearchBrowser;

/// Launch the browser TUI
pub async fn cmd_browse(config: SearchConfig, search_terms: Option<String>) -> Result<()> {
    // The browser still opens without a client and shows the failure inline
    let provider = match HttpSearchProvider::new() {
        Ok(provider) => Some(provider),
        Err(e) => {
            tracing::warn!(error = %e, "failed to build HTTP client");
            None
        }
    };
    let search_terms = search_terms.unwrap_or_default();

    element!(GeoSearchBrowser(
        config: config,
        provider: provider,
        search_terms: search_terms,
    ))
    .fullscreen()
    .await
    .map_err(|e| GeosearchError::Other(format!("TUI error: {}", e)))
}

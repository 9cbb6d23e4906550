//! One-shot search command (`geosearch search`)
//!
//! Runs a single widget cycle against the configured endpoint and prints
//! the results, or commits one of them with `--select`.

use std::time::Duration;

use tabled::Table;
use tabled::settings::Style;

use crate::commands::print_json;
use crate::config::SearchConfig;
use crate::display::{ResultTableRow, format_result_count, format_result_line, format_selection};
use crate::error::{GeosearchError, Result};
use crate::host::{GeoSearch, SearchHost};
use crate::pipeline::MIN_QUERY_CHARS;
use crate::provider::{HttpSearchProvider, SearchProvider};
use crate::types::SearchResult;
use crate::widget::{ResultStatus, WidgetKey};

#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    pub query: String,
    pub json: bool,
    /// Print one line per result instead of a table
    pub plain: bool,
    /// Commit the result at this index, as pressing Down then Enter would
    pub select: Option<usize>,
}

/// Host for command-line use: remembers the committed result.
#[derive(Debug, Default)]
pub struct CliHost {
    pub selected: Option<SearchResult>,
}

impl SearchHost for CliHost {
    fn on_select(&mut self, result: &SearchResult) {
        tracing::info!(label = %result.label, "result selected");
        self.selected = Some(result.clone());
    }
}

/// Execute the search command against the HTTP endpoint
pub async fn cmd_search(config: SearchConfig, options: SearchOptions) -> Result<()> {
    let provider = HttpSearchProvider::new()?;
    let (results, selected) = run_search(provider, config, &options).await?;

    if let Some(index) = options.select {
        let result = selected.ok_or_else(|| {
            GeosearchError::Other(format!(
                "no result at index {} ({})",
                index,
                format_result_count(results.len()).to_lowercase()
            ))
        })?;
        if options.json {
            print_json(&result)?;
        } else {
            println!("{}", format_selection(&result));
        }
        return Ok(());
    }

    if options.json {
        return print_json(&results);
    }

    if options.plain {
        for result in &results {
            println!("{}", format_result_line(result));
        }
    } else if !results.is_empty() {
        let rows: Vec<ResultTableRow> = results.iter().map(ResultTableRow::from).collect();
        let mut table = Table::new(rows);
        table.with(Style::rounded());
        println!("{table}");
    }
    println!("{}", format_result_count(results.len()));

    Ok(())
}

/// Drive one cycle and optionally commit a result.
///
/// Returns the results shown before any commit and the committed result.
async fn run_search<P: SearchProvider + 'static>(
    provider: P,
    config: SearchConfig,
    options: &SearchOptions,
) -> Result<(Vec<SearchResult>, Option<SearchResult>)> {
    let query = options.query.trim();
    if query.chars().count() < MIN_QUERY_CHARS {
        eprintln!(
            "Query '{}' is shorter than {} characters; nothing to search.",
            query, MIN_QUERY_CHARS
        );
        return Ok((Vec::new(), None));
    }

    // A single query has nothing to coalesce
    let mut session =
        GeoSearch::new(provider, config, CliHost::default()).with_debounce(Duration::ZERO);
    session.focus_in();
    session.set_query(query);
    session.settle().await;

    let results = match session.widget().status() {
        ResultStatus::Ready(results) => results.clone(),
        ResultStatus::Failed(failure) => return Err(GeosearchError::Search(failure.clone())),
        other => {
            return Err(GeosearchError::Other(format!(
                "search did not complete: {:?}",
                other
            )));
        }
    };

    if let Some(index) = options.select {
        for _ in 0..index {
            session.press(WidgetKey::Down);
        }
        if session.widget().selected_index() == index {
            session.press(WidgetKey::Enter);
        }
    }

    Ok((results, session.into_host().selected))
}

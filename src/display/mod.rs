//! Terminal formatting for search results.
//!
//! Colors are applied only when stdout supports them, so piped
//! output stays plain.

use owo_colors::{OwoColorize, Stream};
use tabled::Tabled;

use crate::types::SearchResult;

/// Width of the type title column in single-line output
const TYPE_TITLE_WIDTH: usize = 12;

/// A row in the results table
#[derive(Tabled)]
pub struct ResultTableRow {
    #[tabled(rename = "#")]
    pub index: usize,
    #[tabled(rename = "Type")]
    pub type_title: String,
    #[tabled(rename = "Label")]
    pub label: String,
}

impl From<&SearchResult> for ResultTableRow {
    fn from(result: &SearchResult) -> Self {
        Self {
            index: result.id,
            type_title: result.type_title.clone(),
            label: result.label.clone(),
        }
    }
}

/// Single-line form: padded type title, then the label.
pub fn format_result_line(result: &SearchResult) -> String {
    let title = format!("{:width$}", result.type_title, width = TYPE_TITLE_WIDTH);
    format!(
        "{} {}",
        title.if_supports_color(Stream::Stdout, |t| t.cyan()),
        result.label
    )
}

/// Summary printed after a commit.
pub fn format_selection(result: &SearchResult) -> String {
    format!(
        "{} {} ({})",
        "Selected:".if_supports_color(Stream::Stdout, |t| t.green()),
        result.label,
        result.type_title
    )
}

pub fn format_result_count(count: usize) -> String {
    match count {
        0 => "No results".to_string(),
        1 => "1 result".to_string(),
        n => format!("{} results", n),
    }
}

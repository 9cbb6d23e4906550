use std::fmt;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GeosearchError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid endpoint URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("search API returned {status}: {message}")]
    Api {
        status: reqwest::StatusCode,
        message: String,
    },

    #[error("unexpected response body: {0}")]
    Parse(String),

    #[error("{0}")]
    Search(SearchFailure),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, GeosearchError>;

/// Kind of failure shown to the user when a search cannot complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Transport failure or a non-success status from the endpoint
    Network,
    /// The body was not a JSON array of results
    Parse,
}

/// Display-ready description of a failed search.
///
/// Unlike [`GeosearchError`] this is `Clone`, so it can live inside widget
/// state and be handed to renderers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl SearchFailure {
    pub fn network(message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::Network,
            message: message.into(),
        }
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::Parse,
            message: message.into(),
        }
    }
}

impl From<&GeosearchError> for SearchFailure {
    fn from(err: &GeosearchError) -> Self {
        match err {
            GeosearchError::Search(failure) => failure.clone(),
            // reqwest reports body decoding problems as its own error kind
            GeosearchError::Http(e) if e.is_decode() => SearchFailure::parse(err.to_string()),
            GeosearchError::Json(_) | GeosearchError::Parse(_) => {
                SearchFailure::parse(err.to_string())
            }
            _ => SearchFailure::network(err.to_string()),
        }
    }
}

impl fmt::Display for SearchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            FailureKind::Network => write!(f, "search unavailable: {}", self.message),
            FailureKind::Parse => write!(f, "unreadable search response: {}", self.message),
        }
    }
}

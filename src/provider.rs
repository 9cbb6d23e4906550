//! Search endpoint access.
//!
//! [`SearchProvider`] is the seam between the debounce pipeline and the
//! network. [`HttpSearchProvider`] talks to the real endpoint; tests plug in
//! in-memory providers.

use std::time::Duration;

use reqwest::Client;
use serde_json::Value;
use url::Url;

use crate::config::SearchConfig;
use crate::error::{GeosearchError, Result};
use crate::types::SearchResult;

/// Upper bound for a single search request.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Longest error body kept in an API error message.
const MAX_ERROR_BODY: usize = 200;

/// Source of raw search results.
pub trait SearchProvider: Send + Sync {
    /// Fetch the raw JSON array for a fully built request URL.
    fn search(&self, url: &Url) -> impl std::future::Future<Output = Result<Vec<Value>>> + Send;
}

/// Provider backed by an HTTP GET against the configured endpoint.
#[derive(Debug, Clone)]
pub struct HttpSearchProvider {
    client: Client,
}

impl HttpSearchProvider {
    pub fn new() -> Result<Self> {
        Self::with_timeout(REQUEST_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("geosearch/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

impl SearchProvider for HttpSearchProvider {
    async fn search(&self, url: &Url) -> Result<Vec<Value>> {
        tracing::debug!(%url, "sending search request");

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message: String = body.chars().take(MAX_ERROR_BODY).collect();
            return Err(GeosearchError::Api { status, message });
        }

        let body = response.text().await?;
        match serde_json::from_str::<Value>(&body)? {
            Value::Array(items) => Ok(items),
            other => Err(GeosearchError::Parse(format!(
                "expected a JSON array, got {}",
                json_kind(&other)
            ))),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Turn the raw response array into display results.
///
/// Each element gets its display-order id and a type title from the lookup
/// table. Elements that are not JSON objects make the whole response invalid.
pub fn annotate_results(raw: Vec<Value>, config: &SearchConfig) -> Result<Vec<SearchResult>> {
    raw.into_iter()
        .enumerate()
        .map(|(index, value)| {
            let Value::Object(mut fields) = value else {
                return Err(GeosearchError::Parse(format!(
                    "result {} is {}, expected an object",
                    index,
                    json_kind(&value)
                )));
            };

            // Server-sent values for derived keys are replaced, never duplicated
            fields.remove("id");
            fields.remove("typeTitle");
            let result_type = take_string(&mut fields, "type");
            let label = take_string(&mut fields, "label");
            let type_title = config.type_title(Some(result_type.as_str()));

            Ok(SearchResult {
                id: index,
                result_type,
                label,
                type_title,
                extra: fields,
            })
        })
        .collect()
}

fn take_string(fields: &mut serde_json::Map<String, Value>, key: &str) -> String {
    match fields.remove(key) {
        Some(Value::String(s)) => s,
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

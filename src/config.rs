//! Endpoint and display configuration for the search widget.
//!
//! Configuration is resolved in layers:
//! - built-in defaults (the Planning Labs search API)
//! - `config.yaml` in the user config directory, or an explicit path
//! - `GEOSEARCH_HOST`, `GEOSEARCH_ROUTE` and `GEOSEARCH_HELPERS` environment variables
//! - command-line overrides applied by the binary
//!
//! The resolved value is immutable once a widget is built from it.

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;
use url::form_urlencoded::byte_serialize;

use crate::error::{GeosearchError, Result};

pub const DEFAULT_HOST: &str = "https://search-api.planninglabs.nyc";
pub const DEFAULT_ROUTE: &str = "search";
pub const DEFAULT_HELPERS: &[&str] = &[
    "geosearch",
    "city-map-street-search",
    "city-map-alteration",
];
pub const DEFAULT_PLACEHOLDER: &str = "Search...";

/// Title shown for result types missing from the lookup table.
pub const FALLBACK_TYPE_TITLE: &str = "Result";

const HOST_ENV: &str = "GEOSEARCH_HOST";
const ROUTE_ENV: &str = "GEOSEARCH_ROUTE";
const HELPERS_ENV: &str = "GEOSEARCH_HELPERS";

/// Widget configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Base URL of the search service, without trailing route
    pub host: String,
    /// Route appended to the host (e.g. `search`)
    pub route: String,
    /// Sub-search providers the endpoint should consult
    pub helpers: Vec<String>,
    /// Result `type` to display title mapping
    pub type_title_lookup: BTreeMap<String, String>,
    /// Placeholder shown in the empty input
    pub search_placeholder: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            route: DEFAULT_ROUTE.to_string(),
            helpers: DEFAULT_HELPERS.iter().map(|h| h.to_string()).collect(),
            type_title_lookup: BTreeMap::from([("lot".to_string(), "Lot".to_string())]),
            search_placeholder: DEFAULT_PLACEHOLDER.to_string(),
        }
    }
}

impl SearchConfig {
    /// Default location of the config file
    pub fn config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("nyc", "planninglabs", "geosearch")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Load configuration from the default file (if any) and the environment.
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => {
                let mut config = SearchConfig::default();
                config.apply_env();
                config.validate()?;
                Ok(config)
            }
        }
    }

    /// Load configuration from an explicit file, then apply environment overrides.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            GeosearchError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        let mut config: SearchConfig = serde_yaml_ng::from_str(&content)?;
        config.apply_env();
        config.validate()?;
        tracing::debug!(path = %path.display(), "loaded search config");
        Ok(config)
    }

    /// Apply `GEOSEARCH_*` environment overrides. Empty values are ignored.
    pub fn apply_env(&mut self) {
        if let Ok(host) = env::var(HOST_ENV)
            && !host.is_empty()
        {
            self.host = host;
        }
        if let Ok(route) = env::var(ROUTE_ENV)
            && !route.is_empty()
        {
            self.route = route;
        }
        if let Ok(helpers) = env::var(HELPERS_ENV)
            && !helpers.is_empty()
        {
            self.helpers = parse_helper_list(&helpers);
        }
    }

    /// Check that the host is an absolute http(s) URL.
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.host)?;
        match url.scheme() {
            "http" | "https" => Ok(()),
            other => Err(GeosearchError::Config(format!(
                "host must use http or https, got '{}'",
                other
            ))),
        }
    }

    /// Display title for a result type, falling back to "Result".
    pub fn type_title(&self, result_type: Option<&str>) -> String {
        result_type
            .and_then(|t| self.type_title_lookup.get(t))
            .cloned()
            .unwrap_or_else(|| FALLBACK_TYPE_TITLE.to_string())
    }

    /// Build the request URL for a query.
    ///
    /// Produces `{host}/{route}?helpers[]=h1&helpers[]=h2&q=<query>`, with
    /// every value form-encoded and the `helpers[]` keys left literal.
    pub fn endpoint_url(&self, query: &str) -> Result<Url> {
        let base = format!(
            "{}/{}",
            self.host.trim_end_matches('/'),
            self.route.trim_start_matches('/')
        );
        let mut url = Url::parse(&base)?;

        let mut pairs: Vec<String> = self
            .helpers
            .iter()
            .map(|helper| format!("helpers[]={}", encode(helper)))
            .collect();
        pairs.push(format!("q={}", encode(query)));

        url.set_query(Some(&pairs.join("&")));
        Ok(url)
    }
}

fn encode(value: &str) -> String {
    byte_serialize(value.as_bytes()).collect()
}

/// Split a comma-separated helper list, dropping blanks.
pub fn parse_helper_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|h| !h.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_config_default() {
        let config = SearchConfig::default();
        assert_eq!(config.host, "https://search-api.planninglabs.nyc");
        assert_eq!(config.route, "search");
        assert_eq!(
            config.helpers,
            vec!["geosearch", "city-map-street-search", "city-map-alteration"]
        );
        assert_eq!(config.type_title(Some("lot")), "Lot");
        assert_eq!(config.search_placeholder, "Search...");
    }

    #[test]
    fn test_type_title_fallback() {
        let config = SearchConfig::default();
        assert_eq!(config.type_title(Some("street")), "Result");
        assert_eq!(config.type_title(None), "Result");
    }

    #[test]
    fn test_endpoint_url() {
        let config = SearchConfig::default();
        let url = config.endpoint_url("broadway").unwrap();
        insta::assert_snapshot!(url.as_str().replace('&', "\n&"), @r"
        https://search-api.planninglabs.nyc/search?helpers[]=geosearch
        &helpers[]=city-map-street-search
        &helpers[]=city-map-alteration
        &q=broadway
        ");
    }

    #[test]
    fn test_endpoint_url_encodes_query() {
        let config = SearchConfig {
            helpers: vec!["geosearch".to_string()],
            ..Default::default()
        };
        let url = config.endpoint_url("120 Broadway & 5th/#1").unwrap();
        assert_eq!(
            url.query(),
            Some("helpers[]=geosearch&q=120+Broadway+%26+5th%2F%231")
        );
    }

    #[test]
    fn test_endpoint_url_tolerates_slashes() {
        let config = SearchConfig {
            host: "http://localhost:8080/".to_string(),
            route: "/v2/search".to_string(),
            helpers: vec![],
            ..Default::default()
        };
        let url = config.endpoint_url("abc").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/v2/search?q=abc");
    }

    #[test]
    fn test_validate_rejects_non_http_host() {
        let config = SearchConfig {
            host: "ftp://example.com".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(GeosearchError::Config(_))
        ));
    }

    #[test]
    fn test_parse_helper_list() {
        assert_eq!(
            parse_helper_list("geosearch, bbl ,,"),
            vec!["geosearch".to_string(), "bbl".to_string()]
        );
        assert!(parse_helper_list("").is_empty());
    }

    #[test]
    #[serial]
    fn test_load_from_file_with_partial_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(
            &path,
            concat!(
                "host: http://localhost:3000\n",
                "type_title_lookup:\n",
                "  lot: Tax Lot\n",
                "  zma: Zoning Map Amendment\n",
            ),
        )
        .unwrap();

        let config = SearchConfig::load_from(&path).unwrap();
        assert_eq!(config.host, "http://localhost:3000");
        assert_eq!(config.route, "search");
        assert_eq!(config.type_title(Some("lot")), "Tax Lot");
        assert_eq!(config.type_title(Some("zma")), "Zoning Map Amendment");
    }

    #[test]
    #[serial]
    fn test_env_overrides() {
        unsafe {
            env::set_var(HOST_ENV, "http://127.0.0.1:9999");
            env::set_var(HELPERS_ENV, "geosearch,bbl");
        }

        let mut config = SearchConfig::default();
        config.apply_env();

        unsafe {
            env::remove_var(HOST_ENV);
            env::remove_var(HELPERS_ENV);
        }

        assert_eq!(config.host, "http://127.0.0.1:9999");
        assert_eq!(config.route, "search");
        assert_eq!(config.helpers, vec!["geosearch", "bbl"]);
    }

    #[test]
    #[serial]
    fn test_load_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = SearchConfig::load_from(&dir.path().join("nope.yaml"));
        assert!(matches!(result, Err(GeosearchError::Config(_))));
    }
}

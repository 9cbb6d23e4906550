//! Command implementations for the `geosearch` binary

mod browse;
mod config;
mod search;

pub use browse::cmd_browse;
pub use config::{cmd_config_init, cmd_config_path, cmd_config_show};
pub use search::{CliHost, SearchOptions, cmd_search};

use std::path::PathBuf;

use serde::Serialize;

use crate::config::{SearchConfig, parse_helper_list};
use crate::error::Result;

/// Print a value as pretty JSON on stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Settings given on the command line, applied over file and environment.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub config_path: Option<PathBuf>,
    pub host: Option<String>,
    pub route: Option<String>,
    pub helpers: Vec<String>,
}

/// Where the effective configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub config: SearchConfig,
    /// File that was read, if any
    pub source: Option<PathBuf>,
}

/// Load the config file (explicit or default), then environment, then flags.
pub fn resolve_config(overrides: &ConfigOverrides) -> Result<ResolvedConfig> {
    let (mut config, source) = match &overrides.config_path {
        Some(path) => (SearchConfig::load_from(path)?, Some(path.clone())),
        None => {
            let source = SearchConfig::config_path().filter(|path| path.exists());
            (SearchConfig::load()?, source)
        }
    };

    if let Some(host) = &overrides.host {
        config.host = host.clone();
    }
    if let Some(route) = &overrides.route {
        config.route = route.clone();
    }
    if !overrides.helpers.is_empty() {
        config.helpers = overrides
            .helpers
            .iter()
            .flat_map(|h| parse_helper_list(h))
            .collect();
    }
    config.validate()?;

    Ok(ResolvedConfig { config, source })
}

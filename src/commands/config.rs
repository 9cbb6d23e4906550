//! Configuration commands.
//!
//! - `config show`: Display the effective configuration
//! - `config path`: Print the default config file location
//! - `config init`: Write the defaults to the config file

use std::fs;
use std::path::{Path, PathBuf};

use owo_colors::{OwoColorize, Stream};
use serde_json::json;

use super::{ResolvedConfig, print_json};
use crate::config::SearchConfig;
use crate::error::{GeosearchError, Result};

/// Show the effective configuration
pub fn cmd_config_show(resolved: &ResolvedConfig, json: bool) -> Result<()> {
    let config = &resolved.config;
    let source = resolved
        .source
        .as_ref()
        .map(|p| p.display().to_string());

    if json {
        return print_json(&json!({
            "config": config,
            "config_file": source,
            "sample_url": config.endpoint_url("120 Broadway")?.as_str(),
        }));
    }

    let heading = |s: &str| s.if_supports_color(Stream::Stdout, |t| t.cyan()).to_string();

    println!("{}", heading("Configuration:"));
    println!();
    println!("{}: {}", heading("host"), config.host);
    println!("{}: {}", heading("route"), config.route);
    println!("{}: {}", heading("helpers"), config.helpers.join(", "));
    println!("{}: {}", heading("placeholder"), config.search_placeholder);
    println!("{}:", heading("type_titles"));
    for (result_type, title) in &config.type_title_lookup {
        println!("  {}: {}", result_type, title);
    }
    println!();
    let footer = match source {
        Some(path) => format!("Config file: {}", path),
        None => "Config file: none (defaults)".to_string(),
    };
    println!("{}", footer.if_supports_color(Stream::Stdout, |t| t.dimmed()));

    Ok(())
}

/// Print the default config file location
pub fn cmd_config_path() -> Result<()> {
    let path = default_path()?;
    println!("{}", path.display());
    Ok(())
}

/// Write the default configuration to `path` (or the default location).
pub fn cmd_config_init(path: Option<&Path>, force: bool) -> Result<()> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => default_path()?,
    };
    let written = write_default_config(&path, force)?;
    println!("Wrote {}", written.display());
    Ok(())
}

fn default_path() -> Result<PathBuf> {
    SearchConfig::config_path()
        .ok_or_else(|| GeosearchError::Config("no home directory for the config file".to_string()))
}

fn write_default_config(path: &Path, force: bool) -> Result<PathBuf> {
    if path.exists() && !force {
        return Err(GeosearchError::Config(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let yaml = serde_yaml_ng::to_string(&SearchConfig::default())?;
    fs::write(path, yaml)?;
    tracing::debug!(path = %path.display(), "wrote default config");
    Ok(path.to_path_buf())
}

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use geosearch::commands::{
    ConfigOverrides, SearchOptions, cmd_browse, cmd_config_init, cmd_config_path, cmd_config_show,
    cmd_search, resolve_config,
};
use geosearch::error::Result;

/// Environment variable holding the log filter
const LOG_ENV: &str = "GEOSEARCH_LOG";

#[derive(Parser)]
#[command(name = "geosearch")]
#[command(about = "Autocomplete search against a geosearch endpoint")]
#[command(version)]
struct Cli {
    /// Config file (default: platform config directory)
    #[arg(long, global = true, env = "GEOSEARCH_CONFIG")]
    config: Option<PathBuf>,

    /// Search service base URL
    #[arg(long, global = true)]
    host: Option<String>,

    /// Route appended to the host
    #[arg(long, global = true)]
    route: Option<String>,

    /// Helper to consult; repeat or comma-separate
    #[arg(long = "helper", global = true)]
    helpers: Vec<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one search and print the results
    #[command(visible_alias = "s")]
    Search {
        /// Query text
        #[arg(required = true)]
        query: Vec<String>,

        /// Commit the result at this index and print it
        #[arg(long)]
        select: Option<usize>,

        /// One line per result instead of a table
        #[arg(long, conflicts_with = "json")]
        plain: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Interactive search with a live dropdown
    #[command(visible_alias = "b")]
    Browse {
        /// Initial input text
        query: Vec<String>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show the effective configuration
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the default config file path
    Path,
    /// Write the default configuration
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let overrides = ConfigOverrides {
        config_path: cli.config.clone(),
        host: cli.host,
        route: cli.route,
        helpers: cli.helpers,
    };

    match cli.command {
        Commands::Search {
            query,
            select,
            plain,
            json,
        } => {
            let resolved = resolve_config(&overrides)?;
            cmd_search(
                resolved.config,
                SearchOptions {
                    query: query.join(" "),
                    json,
                    plain,
                    select,
                },
            )
            .await
        }
        Commands::Browse { query } => {
            let resolved = resolve_config(&overrides)?;
            let terms = (!query.is_empty()).then(|| query.join(" "));
            cmd_browse(resolved.config, terms).await
        }
        Commands::Config { action } => match action {
            ConfigAction::Show { json } => cmd_config_show(&resolve_config(&overrides)?, json),
            ConfigAction::Path => cmd_config_path(),
            ConfigAction::Init { force } => cmd_config_init(cli.config.as_deref(), force),
        },
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

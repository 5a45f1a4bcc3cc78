// crates/trustlens-cli/src/main.rs
//
// CLI entrypoint for TrustLens.
//
// Loads configuration, initializes tracing, opens the trust database and
// the review store, and dispatches to one command handler. This binary is
// the command surface a rendering front end drives.

mod commands;
mod config;
mod output;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use commands::review::ReviewCmd;
use config::{expand_tilde, CliConfig};
use output::OutputFormat;
use trustlens_core::traits::AggregateStore;
use trustlens_reputation::{MatchMode, TrustLens};
use trustlens_store::{MemoryStore, RocksStore};

/// TrustLens CLI — trust scores for news sources, blended with your own reviews.
#[derive(Parser, Debug)]
#[command(
    name = "trustlens",
    version = "0.1.0",
    about = "Look up source trust scores and record user reviews"
)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(long, global = true, default_value = "~/.trustlens/config.toml")]
    config: String,

    /// Trust database path (overrides config).
    #[arg(long, global = true)]
    trust_db: Option<String>,

    /// Data directory for the review store (overrides config).
    #[arg(long, global = true)]
    data_dir: Option<String>,

    /// Hostname matching mode: substring or label (overrides config).
    #[arg(long, global = true)]
    match_mode: Option<MatchMode>,

    /// Keep reviews in memory for this invocation only.
    #[arg(long, global = true)]
    in_memory: bool,

    /// Emit JSON instead of tables.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level subcommands.
#[derive(Debug, Subcommand)]
enum Commands {
    /// Show the merged trust record for a page URL.
    Lookup {
        /// Page URL.
        url: String,
    },

    /// Print the trust database key a URL resolves to.
    Resolve {
        /// Page URL.
        url: String,
    },

    /// Rate a page's source (1-10 on each scale).
    Review(ReviewCmd),

    /// List the reviews recorded for a domain key.
    Reviews {
        /// Domain key, as printed by `resolve`.
        domain: String,
    },

    /// List every domain with local reviews.
    Domains,

    /// Print the page-notification badge for a URL (silent for unknown sources).
    Notice {
        /// Page URL.
        url: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Config comes first so its log level can seed the subscriber.
    let (mut cli_config, config_error) = match CliConfig::load(&cli.config) {
        Ok(cfg) => (cfg, None),
        Err(e) => (CliConfig::default(), Some(e.to_string())),
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli_config.log_level)),
        )
        .init();

    match config_error {
        None => tracing::info!("Loaded configuration from {}", cli.config),
        Some(e) => tracing::warn!(
            "Could not load config from {}: {}. Using defaults.",
            cli.config,
            e
        ),
    }

    // CLI flags override the config file values.
    if let Some(path) = &cli.trust_db {
        cli_config.trust_db_path = path.clone();
    }
    if let Some(dir) = &cli.data_dir {
        cli_config.data_dir = dir.clone();
    }
    if let Some(mode) = cli.match_mode {
        cli_config.match_mode = mode;
    }

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Table
    };

    let trust_store = TrustLens::load_trust_store(expand_tilde(&cli_config.trust_db_path));

    let store: Arc<dyn AggregateStore> = if cli.in_memory {
        Arc::new(MemoryStore::new())
    } else {
        let db_path = cli_config.reviews_db_path();
        if let Some(parent) = std::path::Path::new(&db_path).parent() {
            std::fs::create_dir_all(parent)?;
        }
        let rocks = RocksStore::open(&db_path)?;
        tracing::debug!("Review store opened at {}", db_path);
        Arc::new(rocks)
    };

    let lens = TrustLens::new(
        trust_store,
        store,
        cli_config.match_mode,
        cli_config.max_submit_attempts,
    );

    match &cli.command {
        Commands::Lookup { url } => commands::lookup::run(&lens, url, format).await?,
        Commands::Resolve { url } => commands::resolve::run(&lens, url, format)?,
        Commands::Review(cmd) => commands::review::run(&lens, cmd, format).await?,
        Commands::Reviews { domain } => commands::reviews::run(&lens, domain, format).await?,
        Commands::Domains => commands::domains::run(&lens, format).await?,
        Commands::Notice { url } => commands::notice::run(&lens, url, format)?,
    }

    Ok(())
}

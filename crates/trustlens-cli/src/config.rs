// crates/trustlens-cli/src/config.rs
//
// Runtime configuration for the TrustLens CLI.
// Loaded from a TOML file or populated with sensible defaults.

use serde::Deserialize;
use std::fs;

use trustlens_reputation::{MatchMode, DEFAULT_MAX_SUBMIT_ATTEMPTS};

/// Runtime configuration for the CLI.
#[derive(Debug, Clone, Deserialize)]
pub struct CliConfig {
    /// Path to the static trust database (JSON).
    #[serde(default = "default_trust_db_path")]
    pub trust_db_path: String,

    /// Directory for local data storage. Reviews live in `{data_dir}/reviews`.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Hostname matching: "substring" or "label".
    #[serde(default)]
    pub match_mode: MatchMode,

    /// Compare-and-swap attempts before a review submission fails.
    #[serde(default = "default_max_submit_attempts")]
    pub max_submit_attempts: u32,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_trust_db_path() -> String {
    "~/.trustlens/trust_database.json".to_string()
}

fn default_data_dir() -> String {
    "~/.trustlens/data".to_string()
}

fn default_max_submit_attempts() -> u32 {
    DEFAULT_MAX_SUBMIT_ATTEMPTS
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            trust_db_path: default_trust_db_path(),
            data_dir: default_data_dir(),
            match_mode: MatchMode::default(),
            max_submit_attempts: default_max_submit_attempts(),
            log_level: default_log_level(),
        }
    }
}

impl CliConfig {
    /// Load configuration from a TOML file at the given path.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = fs::read_to_string(expand_tilde(path))?;
        let config: CliConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Path of the RocksDB review database.
    pub fn reviews_db_path(&self) -> String {
        format!("{}/reviews", expand_tilde(&self.data_dir))
    }
}

/// Expand a leading `~/` to the user's home directory.
pub fn expand_tilde(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return format!("{}/{}", home.display(), rest);
        }
    }
    path.to_string()
}

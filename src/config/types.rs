use serde::Deserialize;
use std::time::Duration;

/// Default location of the result database
pub const DEFAULT_DATABASE_PATH: &str = "tagcounter_data/tagcounter.db";

/// Default location of the alias file
pub const DEFAULT_ALIAS_PATH: &str = "tagcounter_data/synonyms.toml";

/// Default fetch timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Main configuration structure for tagcounter
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
}

/// Where persistent data lives
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Path to the SQLite result database
    #[serde(rename = "database-path", default = "default_database_path")]
    pub database_path: String,

    /// Path to the TOML alias file
    #[serde(rename = "alias-path", default = "default_alias_path")]
    pub alias_path: String,
}

/// Network fetch behavior
#[derive(Debug, Clone, Deserialize)]
pub struct FetchConfig {
    /// Upper bound for one page fetch, in seconds
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User-Agent header sent with every request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,
}

impl FetchConfig {
    /// The fetch timeout as a duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            alias_path: default_alias_path(),
        }
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_database_path() -> String {
    DEFAULT_DATABASE_PATH.to_string()
}

fn default_alias_path() -> String {
    DEFAULT_ALIAS_PATH.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_user_agent() -> String {
    format!("tagcounter/{}", env!("CARGO_PKG_VERSION"))
}

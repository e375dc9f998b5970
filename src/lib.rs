//! Tagcounter: count HTML tags on a web page, once per site
//!
//! This crate resolves a site identifier (or one of its aliases) to a canonical
//! host, fetches `http://<host>/` at most once, counts start and end tags, and
//! keeps the formatted result in a SQLite store so later requests are served
//! from the cache.

pub mod alias;
pub mod config;
pub mod context;
pub mod output;
pub mod pipeline;
pub mod state;
pub mod storage;
pub mod url;

use thiserror::Error;

/// Main error type for tagcounter operations
#[derive(Debug, Error)]
pub enum TagCounterError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Alias table error: {0}")]
    Alias(#[from] alias::AliasError),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Invalid state transition: {from:?} -> {to:?}")]
    InvalidTransition {
        from: state::RequestState,
        to: state::RequestState,
    },
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

// Re-export commonly used types
pub use alias::{AliasResolver, AliasStore, FileAliasStore, MemoryAliasStore};
pub use config::Config;
pub use context::{AppContext, AppCoordinator};
pub use pipeline::{
    count_tags, Coordinator, FetchError, HttpFetcher, Outcome, PageFetcher, TagCounts,
    ViewOutcome,
};
pub use state::RequestState;
pub use storage::{FetchRecord, ResultStore, SqliteStore};
pub use url::{full_url_for, host_label};

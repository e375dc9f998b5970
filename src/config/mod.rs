//! Configuration module for tagcounter
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file. Every key has a default, so running without a file
//! behaves like the classic tool: data under `tagcounter_data/` and a 60 second
//! fetch timeout.
//!
//! # Example
//!
//! ```no_run
//! use tagcounter::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("tagcounter.toml")).unwrap();
//! println!("Results stored in: {}", config.storage.database_path);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, FetchConfig, StorageConfig, DEFAULT_ALIAS_PATH, DEFAULT_DATABASE_PATH,
    DEFAULT_TIMEOUT_SECS,
};

// Re-export parser functions
pub use parser::{load_config, load_config_or_default, parse_config};

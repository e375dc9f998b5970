//! Storage module for persisting fetch results
//!
//! This module handles all database operations, including:
//! - SQLite database initialization and schema management
//! - Appending one record per completed fetch
//! - "Most recent record for URL" lookup that backs the cache
//! - History listing and truncation

mod schema;
mod sqlite;
mod traits;

pub use sqlite::SqliteStore;
pub use traits::{ResultStore, StorageError, StorageResult};

use chrono::{DateTime, Utc};
use std::path::Path;

/// Initializes or opens a result store
///
/// # Arguments
///
/// * `path` - Path to the SQLite database file
///
/// # Returns
///
/// * `Ok(SqliteStore)` - Successfully initialized storage
/// * `Err(StorageError)` - Failed to initialize storage
pub fn open_storage(path: &Path) -> StorageResult<SqliteStore> {
    SqliteStore::new(path)
}

/// One completed fetch, as stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRecord {
    pub id: i64,
    /// Host label of the site (e.g. `google` for `google.com`)
    pub short_site: String,
    /// Full URL that was fetched
    pub full_url: String,
    /// When the record was inserted
    pub created_at: DateTime<Utc>,
    /// Formatted tag counts
    pub tag_data: String,
}

//! Storage traits and error types
//!
//! This module defines the trait interface for result store backends and
//! associated error types.

use crate::storage::FetchRecord;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Corrupt record {id}: {message}")]
    Corrupt { id: i64, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for result store implementations
///
/// The store is append-only: records are inserted, never updated, and only
/// removed all at once by [`ResultStore::truncate`]. Several records may
/// exist for one URL; the most recently inserted one is authoritative.
pub trait ResultStore {
    /// Gets the most recently inserted record for a full URL
    ///
    /// # Returns
    ///
    /// * `Ok(Some(record))` - A record exists
    /// * `Ok(None)` - No record for this URL
    /// * `Err(StorageError)` - The store could not be queried
    fn find_latest(&self, full_url: &str) -> StorageResult<Option<FetchRecord>>;

    /// Appends a new record
    ///
    /// # Arguments
    ///
    /// * `results_text` - The formatted tag counts
    /// * `short_url` - The canonical site (e.g. `google.com`)
    /// * `full_url` - The requested URL (e.g. `http://google.com/`)
    ///
    /// # Returns
    ///
    /// The ID of the newly inserted record
    fn insert(&mut self, results_text: &str, short_url: &str, full_url: &str)
        -> StorageResult<i64>;

    /// Removes every record
    fn truncate(&mut self) -> StorageResult<()>;

    /// Gets all records for a full URL, newest first
    fn history(&self, full_url: &str) -> StorageResult<Vec<FetchRecord>>;

    /// Counts all records
    fn count(&self) -> StorageResult<u64>;
}

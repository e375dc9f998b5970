//! SQLite storage implementation
//!
//! This module provides a SQLite-based implementation of the ResultStore trait.

use crate::storage::schema::initialize_schema;
use crate::storage::traits::{ResultStore, StorageError, StorageResult};
use crate::storage::FetchRecord;
use crate::url::host_label;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;

const SELECT_COLUMNS: &str = "SELECT id, site, url, date, tagdata FROM tagsdb";

/// SQLite result store
pub struct SqliteStore {
    conn: Connection,
}

/// A row as read from SQLite, before text decoding
struct RawRecord {
    id: i64,
    site: String,
    url: String,
    date: String,
    tagdata: Vec<u8>,
}

impl RawRecord {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            site: row.get(1)?,
            url: row.get(2)?,
            date: row.get(3)?,
            tagdata: row.get(4)?,
        })
    }

    fn into_record(self) -> StorageResult<FetchRecord> {
        let created_at = DateTime::parse_from_rfc3339(&self.date)
            .map_err(|e| StorageError::Corrupt {
                id: self.id,
                message: format!("bad date '{}': {}", self.date, e),
            })?
            .with_timezone(&Utc);

        let tag_data = String::from_utf8(self.tagdata).map_err(|e| StorageError::Corrupt {
            id: self.id,
            message: format!("tag data is not UTF-8: {}", e),
        })?;

        Ok(FetchRecord {
            id: self.id,
            short_site: self.site,
            full_url: self.url,
            created_at,
            tag_data,
        })
    }
}

impl SqliteStore {
    /// Creates a new SqliteStore instance
    ///
    /// Missing parent directories are created.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the SQLite database file
    ///
    /// # Returns
    ///
    /// * `Ok(SqliteStore)` - Successfully opened/created database
    /// * `Err(StorageError)` - Failed to open database
    pub fn new(path: &Path) -> StorageResult<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA temp_store = MEMORY;
        ",
        )?;

        initialize_schema(&conn)?;

        Ok(Self { conn })
    }

    /// Creates an in-memory database
    ///
    /// Each instance is isolated, which makes it the store of choice for tests.
    pub fn new_in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Appends a record with an explicit timestamp
    fn insert_at(
        &mut self,
        results_text: &str,
        short_url: &str,
        full_url: &str,
        created_at: DateTime<Utc>,
    ) -> StorageResult<i64> {
        self.conn.execute(
            "INSERT INTO tagsdb (site, url, date, tagdata) VALUES (?1, ?2, ?3, ?4)",
            params![
                host_label(short_url),
                full_url,
                created_at.to_rfc3339(),
                results_text.as_bytes()
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }
}

impl ResultStore for SqliteStore {
    fn find_latest(&self, full_url: &str) -> StorageResult<Option<FetchRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{SELECT_COLUMNS} WHERE url = ?1 ORDER BY id DESC LIMIT 1"))?;

        let raw = stmt
            .query_row(params![full_url], RawRecord::from_row)
            .optional()?;

        raw.map(RawRecord::into_record).transpose()
    }

    fn insert(
        &mut self,
        results_text: &str,
        short_url: &str,
        full_url: &str,
    ) -> StorageResult<i64> {
        self.insert_at(results_text, short_url, full_url, Utc::now())
    }

    fn truncate(&mut self) -> StorageResult<()> {
        self.conn.execute_batch(
            "
            DELETE FROM tagsdb;
            DELETE FROM sqlite_sequence WHERE name = 'tagsdb';
        ",
        )?;
        Ok(())
    }

    fn history(&self, full_url: &str) -> StorageResult<Vec<FetchRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{SELECT_COLUMNS} WHERE url = ?1 ORDER BY id DESC"))?;

        let raws = stmt
            .query_map(params![full_url], RawRecord::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        raws.into_iter().map(RawRecord::into_record).collect()
    }

    fn count(&self) -> StorageResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM tagsdb", [], |row| row.get(0))?;
        Ok(count as u64)
    }
}

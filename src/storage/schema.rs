//! Database schema definitions
//!
//! This module contains the SQL schema for the tagcounter result database.

/// SQL schema for the database
pub const SCHEMA_SQL: &str = r#"
-- One row per completed fetch; rows are never updated
CREATE TABLE IF NOT EXISTS tagsdb (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    site TEXT NOT NULL,
    url TEXT NOT NULL,
    date TEXT NOT NULL,
    tagdata BLOB NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_tagsdb_url ON tagsdb(url);
"#;

/// Initializes the database schema
///
/// # Arguments
///
/// * `conn` - The database connection
///
/// # Returns
///
/// * `Ok(())` - Schema initialized successfully
/// * `Err(rusqlite::Error)` - Failed to initialize schema
pub fn initialize_schema(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}

//! Database schema definitions
//!
//! Contains SQL for creating the watch tables and indexes

use super::DbError;
use rusqlite::Connection;

/// SQL schema for all tables
///
/// Watches are listed in `rowid` order; rows are inserted and deleted but
/// never rewritten.
const SCHEMA: &str = r#"
-- Watched folder roots and their collection mapping policy
CREATE TABLE IF NOT EXISTS watches (
    folder_path TEXT PRIMARY KEY,
    root_folder_name TEXT NOT NULL,
    collection_mapping TEXT NOT NULL CHECK (collection_mapping IN ('root', 'parent')),
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_watches_name ON watches(root_folder_name);
"#;

/// Create all database tables
pub fn create_tables(conn: &Connection) -> Result<(), DbError> {
    conn.execute_batch(SCHEMA)?;
    Ok(())
}

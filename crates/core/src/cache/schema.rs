//! SQLite schema definition and migrations for the scan cache.

use rusqlite::Connection;
use thiserror::Error;

/// Current schema version.
pub const SCHEMA_VERSION: i32 = 1;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Schema version {found} is newer than supported {supported}")]
    VersionTooNew { found: i32, supported: i32 },
}

/// Initialize or migrate the database schema.
pub fn init_schema(conn: &Connection) -> Result<(), SchemaError> {
    let version = get_schema_version(conn)?;

    if version == 0 {
        create_schema_v1(conn)?;
        set_schema_version(conn, SCHEMA_VERSION)?;
    } else if version > SCHEMA_VERSION {
        return Err(SchemaError::VersionTooNew {
            found: version,
            supported: SCHEMA_VERSION,
        });
    }

    Ok(())
}

fn get_schema_version(conn: &Connection) -> Result<i32, SchemaError> {
    let exists: bool = conn.query_row(
        "SELECT COUNT(*) > 0 FROM sqlite_master WHERE type='table' AND name='schema_version'",
        [],
        |row| row.get(0),
    )?;

    if !exists {
        return Ok(0);
    }

    let version: i32 =
        conn.query_row("SELECT version FROM schema_version", [], |row| row.get(0))?;

    Ok(version)
}

fn set_schema_version(conn: &Connection, version: i32) -> Result<(), SchemaError> {
    conn.execute(
        "INSERT OR REPLACE INTO schema_version (id, version) VALUES (1, ?1)",
        [version],
    )?;
    Ok(())
}

fn create_schema_v1(conn: &Connection) -> Result<(), SchemaError> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS schema_version (
            id INTEGER PRIMARY KEY CHECK (id = 1),
            version INTEGER NOT NULL
        );

        -- One unfiltered scan snapshot per vault. Payload and timestamp share
        -- a row so they are written and removed together.
        CREATE TABLE IF NOT EXISTS vault_scans (
            cache_key TEXT PRIMARY KEY,
            vault_path TEXT NOT NULL,
            cache_version INTEGER NOT NULL,
            note_count INTEGER NOT NULL,
            notes_json TEXT NOT NULL,
            written_at INTEGER NOT NULL
        );
        "#,
    )?;
    Ok(())
}

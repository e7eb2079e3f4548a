//! Persistent scan cache keyed by vault path.

use std::fs;
use std::path::Path;
use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};
use rusqlite::{Connection, OptionalExtension, params};
use sha2::{Digest, Sha256};
use thiserror::Error;

use super::schema::{SchemaError, init_schema};
use crate::vault::NoteRecord;

/// Namespace mixed into every cache key.
pub const CACHE_NAMESPACE: &str = "vaultdash-vault-scan";

/// Version of the serialized payload. Rows written with another version are
/// treated as misses.
pub const CACHE_VERSION: i64 = 1;

/// Default freshness window.
pub const DEFAULT_MAX_AGE: Duration = Duration::from_secs(5 * 60);

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    #[error("Failed to create cache directory {path}: {source}")]
    CreateDir {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize notes: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Stable, fixed-length key for a vault path: hex SHA-256 of the namespaced
/// path string.
pub fn cache_key(vault: &Path) -> String {
    let mut hasher = Sha256::new();
    hasher.update(CACHE_NAMESPACE.as_bytes());
    hasher.update(b":");
    hasher.update(vault.to_string_lossy().as_bytes());
    hex::encode(hasher.finalize())
}

/// Scan cache handle.
pub struct VaultCache {
    conn: Connection,
}

impl VaultCache {
    /// Open or create a cache database at the given path.
    pub fn open(path: &Path) -> Result<Self, CacheError> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| CacheError::CreateDir {
                path: parent.display().to_string(),
                source: e,
            })?;
        }

        let conn = Connection::open(path)?;
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA busy_timeout = 5000;",
        )?;
        init_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Create an in-memory cache (for testing).
    pub fn open_in_memory() -> Result<Self, CacheError> {
        let conn = Connection::open_in_memory()?;
        init_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Cached notes for a vault, ignoring freshness.
    ///
    /// Rows with a different payload version, a different recorded vault
    /// path, or a payload that no longer deserializes are misses.
    pub fn get(&self, vault: &Path) -> Option<Vec<NoteRecord>> {
        let row = self
            .conn
            .query_row(
                "SELECT vault_path, cache_version, notes_json FROM vault_scans WHERE cache_key = ?1",
                [cache_key(vault)],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, i64>(1)?,
                        row.get::<_, String>(2)?,
                    ))
                },
            )
            .optional();

        let (recorded_path, version, json) = match row {
            Ok(Some(row)) => row,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!("Cache read failed for {}: {}", vault.display(), e);
                return None;
            }
        };

        if version != CACHE_VERSION || recorded_path != vault.to_string_lossy() {
            tracing::debug!(
                "Ignoring cache entry for {} (version {}, recorded path {})",
                vault.display(),
                version,
                recorded_path
            );
            return None;
        }

        match serde_json::from_str(&json) {
            Ok(notes) => Some(notes),
            Err(e) => {
                tracing::warn!("Corrupt cache entry for {}: {}", vault.display(), e);
                None
            }
        }
    }

    /// Store the unfiltered notes for a vault, stamped with the current time.
    pub fn put(&self, vault: &Path, notes: &[NoteRecord]) -> Result<(), CacheError> {
        self.put_at(vault, notes, Utc::now())
    }

    pub(crate) fn put_at(
        &self,
        vault: &Path,
        notes: &[NoteRecord],
        written_at: DateTime<Utc>,
    ) -> Result<(), CacheError> {
        let json = serde_json::to_string(notes)?;
        self.conn.execute(
            "INSERT INTO vault_scans (cache_key, vault_path, cache_version, note_count, notes_json, written_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             ON CONFLICT(cache_key) DO UPDATE SET
                vault_path = excluded.vault_path,
                cache_version = excluded.cache_version,
                note_count = excluded.note_count,
                notes_json = excluded.notes_json,
                written_at = excluded.written_at",
            params![
                cache_key(vault),
                vault.to_string_lossy(),
                CACHE_VERSION,
                i64::try_from(notes.len()).unwrap_or(i64::MAX),
                json,
                written_at.timestamp_millis(),
            ],
        )?;
        Ok(())
    }

    /// When the entry for `vault` was last written.
    pub fn written_at(&self, vault: &Path) -> Option<DateTime<Utc>> {
        let millis: Option<i64> = self
            .conn
            .query_row(
                "SELECT written_at FROM vault_scans WHERE cache_key = ?1",
                [cache_key(vault)],
                |row| row.get(0),
            )
            .optional()
            .ok()
            .flatten();
        millis.and_then(|ms| Utc.timestamp_millis_opt(ms).single())
    }

    /// `now - written_at < max_age`. Missing entries are never fresh.
    pub fn is_fresh(&self, vault: &Path, max_age: Duration) -> bool {
        self.is_fresh_at(vault, max_age, Utc::now())
    }

    pub fn is_fresh_at(&self, vault: &Path, max_age: Duration, now: DateTime<Utc>) -> bool {
        let Some(written_at) = self.written_at(vault) else {
            return false;
        };
        let age_ms = now.timestamp_millis() - written_at.timestamp_millis();
        age_ms < i64::try_from(max_age.as_millis()).unwrap_or(i64::MAX)
    }

    /// Drop the entry for one vault. Returns whether an entry existed.
    pub fn invalidate(&self, vault: &Path) -> Result<bool, CacheError> {
        let rows = self
            .conn
            .execute("DELETE FROM vault_scans WHERE cache_key = ?1", [cache_key(vault)])?;
        Ok(rows > 0)
    }

    /// Drop every entry. Returns the number removed.
    pub fn invalidate_all(&self) -> Result<usize, CacheError> {
        Ok(self.conn.execute("DELETE FROM vault_scans", [])?)
    }
}

//! SQLite key-value backend.
//!
//! The week snapshot lives as one JSON value in a `kv` table, keyed by the
//! configured storage key, so several profiles can share a database file.

use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

use super::WeekDataRepository;
use crate::error::StorageError;
use crate::schedule::WeekData;

/// SQLite database holding week snapshots.
pub struct SqliteRepository {
    conn: Connection,
    key: String,
}

impl SqliteRepository {
    /// Open (or create) the database at `path`.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open(path: &Path, key: &str) -> Result<Self, StorageError> {
        let conn = Connection::open(path).map_err(|source| StorageError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let repo = Self {
            conn,
            key: key.to_string(),
        };
        repo.migrate()?;
        Ok(repo)
    }

    /// Open an in-memory database.
    pub fn open_memory(key: &str) -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        let repo = Self {
            conn,
            key: key.to_string(),
        };
        repo.migrate()?;
        Ok(repo)
    }

    fn migrate(&self) -> Result<(), rusqlite::Error> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )
    }

    /// Get a value from the kv store.
    pub fn kv_get(&self, key: &str) -> Result<Option<String>, rusqlite::Error> {
        self.conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get::<_, String>(0)
            })
            .optional()
    }

    /// Set a value in the kv store.
    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), rusqlite::Error> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    /// Remove a key; returns whether a row was deleted.
    pub fn kv_delete(&self, key: &str) -> Result<bool, rusqlite::Error> {
        let deleted = self
            .conn
            .execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(deleted > 0)
    }

    fn write(&self, data: &WeekData) -> Result<(), StorageError> {
        let json = serde_json::to_string(data)?;
        self.kv_set(&self.key, &json)?;
        Ok(())
    }

    fn read(&self) -> Result<Option<WeekData>, StorageError> {
        match self.kv_get(&self.key)? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }
}

impl WeekDataRepository for SqliteRepository {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn save(&self, data: &WeekData) -> bool {
        match self.write(data) {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(key = %self.key, error = %e, "failed to save week data");
                false
            }
        }
    }

    fn load(&self) -> Option<WeekData> {
        self.read().unwrap_or_else(|e| {
            tracing::error!(key = %self.key, error = %e, "failed to load week data");
            None
        })
    }

    fn clear(&self) -> bool {
        match self.kv_delete(&self.key) {
            Ok(_) => true,
            Err(e) => {
                tracing::error!(key = %self.key, error = %e, "failed to clear week data");
                false
            }
        }
    }

    fn exists(&self) -> bool {
        match self.kv_get(&self.key) {
            Ok(value) => value.is_some(),
            Err(e) => {
                tracing::error!(key = %self.key, error = %e, "failed to check week data");
                false
            }
        }
    }
}

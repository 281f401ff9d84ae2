use rusqlite::{params, Connection, OptionalExtension};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::core::ports::kv::KvStorePort;
use crate::core::ports::DynError;

#[cfg(test)]
mod tests;

/// Key-value table in a local SQLite file. A connection is opened per call.
pub struct SqliteKvStore {
    db_path: PathBuf,
}

impl SqliteKvStore {
    pub fn new(db_path: PathBuf) -> Self {
        Self { db_path }
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    fn open(&self) -> rusqlite::Result<Connection> {
        let conn = Connection::open(&self.db_path)?;
        conn.busy_timeout(std::time::Duration::from_secs(5))?;
        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;

            CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
            ",
        )?;
        Ok(conn)
    }
}

impl KvStorePort for SqliteKvStore {
    fn get(&self, key: &str) -> Result<Option<String>, DynError> {
        let conn = self.open()?;
        let value = conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get::<_, String>(0)
            })
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), DynError> {
        let conn = self.open()?;
        let updated_at = chrono::Utc::now().to_rfc3339();
        conn.execute(
            "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, updated_at],
        )?;
        Ok(())
    }
}

/// In-process map. Contents vanish with the value.
#[derive(Default)]
pub struct MemoryKvStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStorePort for MemoryKvStore {
    fn get(&self, key: &str) -> Result<Option<String>, DynError> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| "memory kv lock poisoned")?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), DynError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| "memory kv lock poisoned")?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

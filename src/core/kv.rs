use std::collections::HashMap;
use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension};

use crate::core::error::WorkbenchError;
use crate::core::time::now_utc;

/// Scoped key-value persistence contract. The workbook stores the full
/// threat snapshot under one fixed key; anything fancier belongs to the
/// implementation.
pub trait SnapshotStore {
    fn get(&self, key: &str) -> Result<Option<String>, WorkbenchError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), WorkbenchError>;
}

/// SQLite-backed snapshot store.
pub struct SqliteSnapshots {
    conn: Connection,
}

impl SqliteSnapshots {
    pub fn default_path() -> std::path::PathBuf {
        std::path::PathBuf::from("data").join("workbench.db")
    }

    pub fn new(path: &Path) -> Result<Self, WorkbenchError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> Result<(), WorkbenchError> {
        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS snapshots (
              key TEXT PRIMARY KEY,
              value TEXT NOT NULL,
              updated_at TEXT NOT NULL
            );
            ",
        )?;
        Ok(())
    }

    pub fn delete(&mut self, key: &str) -> Result<(), WorkbenchError> {
        self.conn
            .execute("DELETE FROM snapshots WHERE key = ?1", params![key])?;
        Ok(())
    }
}

impl SnapshotStore for SqliteSnapshots {
    fn get(&self, key: &str) -> Result<Option<String>, WorkbenchError> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM snapshots WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), WorkbenchError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO snapshots (key, value, updated_at) VALUES (?1, ?2, ?3)",
            params![key, value, now_utc().to_rfc3339()],
        )?;
        Ok(())
    }
}

/// In-memory store for tests and `--ephemeral` sessions.
#[derive(Default)]
pub struct MemorySnapshots {
    map: HashMap<String, String>,
    /// When set, every write is rejected. Lets tests exercise the
    /// fail-silent save path.
    pub reject_writes: bool,
}

impl MemorySnapshots {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotStore for MemorySnapshots {
    fn get(&self, key: &str) -> Result<Option<String>, WorkbenchError> {
        Ok(self.map.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), WorkbenchError> {
        if self.reject_writes {
            return Err(WorkbenchError::Persistence("write rejected".into()));
        }
        self.map.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

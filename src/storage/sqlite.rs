/// SQLite implementation of the state repository
///
/// This module provides the concrete SQLite implementation used when the
/// client runs against a database file on disk. The schema is a single
/// key-value table holding serialized state blobs.

use std::path::PathBuf;
use rusqlite::{params, Connection, OptionalExtension};

use crate::storage::{StateRepository, StorageError};

/// SQLite-based key-value repository
///
/// This struct holds a connection to the SQLite database and implements the
/// repository operations defined in the StateRepository trait.
pub struct SqliteRepository {
    conn: Connection,
}

impl SqliteRepository {
    /// Create a new SQLite repository instance
    ///
    /// This opens the database file and creates the schema if it doesn't
    /// already exist.
    pub fn new(db_path: PathBuf) -> Result<Self, StorageError> {
        let conn = Connection::open(&db_path)
            .map_err(|e| StorageError::Connection(format!("Failed to open database: {}", e)))?;

        Self::initialize_schema(&conn)?;

        tracing::info!("SQLite repository initialized at: {:?}", db_path);

        Ok(Self { conn })
    }

    /// Create an in-memory repository, useful for ephemeral runs
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| StorageError::Connection(format!("Failed to open database: {}", e)))?;
        Self::initialize_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Create the key-value table if it doesn't exist (idempotent)
    fn initialize_schema(conn: &Connection) -> Result<(), StorageError> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS app_state (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )",
            [],
        )?;
        Ok(())
    }
}

impl StateRepository for SqliteRepository {
    /// Read the blob stored under a key
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let mut stmt = self
            .conn
            .prepare("SELECT value FROM app_state WHERE key = ?1")?;

        let value = stmt
            .query_row(params![key], |row| row.get::<_, String>(0))
            .optional()?;

        Ok(value)
    }

    /// Store a blob under a key, replacing any previous value
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT INTO app_state (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, chrono::Utc::now().to_rfc3339()],
        )?;

        tracing::debug!("Persisted {} bytes under key '{}'", value.len(), key);
        Ok(())
    }
}

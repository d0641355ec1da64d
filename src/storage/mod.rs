/// Storage layer for persisting the tracked history
///
/// This module defines the key-value repository interface the history store
/// writes through, plus the SQLite and in-memory implementations. The history
/// is persisted as one serialized blob under a fixed key, so the interface is
/// deliberately narrow.

pub mod sqlite;
pub mod memory;

// Re-export the main storage types
pub use sqlite::*;
pub use memory::*;

use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database connection error: {0}")]
    Connection(String),

    #[error("Database query error: {0}")]
    Query(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Key-value repository the history store persists through
///
/// The trait exists so the SQLite store can be swapped for an in-memory fake
/// in tests; the history store receives an implementation at construction and
/// never touches a global handle.
pub trait StateRepository: Send {
    /// Read the value stored under `key`, if any
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-memory implementation of the state repository
///
/// This repository backs tests and any caller that wants the full client
/// without touching disk. It implements the same StateRepository trait as the
/// SQLite version so the two are interchangeable.

use std::collections::HashMap;

use crate::storage::{StateRepository, StorageError};

/// Repository that keeps blobs in a plain map
#[derive(Debug, Default)]
pub struct MemoryRepository {
    entries: HashMap<String, String>,
}

impl MemoryRepository {
    /// Create an empty in-memory repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository pre-seeded with one stored blob
    ///
    /// Tests use this to simulate an existing (or corrupted) installation.
    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut entries = HashMap::new();
        entries.insert(key.to_string(), value.to_string());
        Self { entries }
    }
}

impl StateRepository for MemoryRepository {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

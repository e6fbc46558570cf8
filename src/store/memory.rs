// MemoryStore - in-memory FileStore backend

use crate::store::{FileStore, StoreError, StoreResult};
use std::collections::BTreeMap;

/// FileStore backed by an ordered map
///
/// Never produces IO errors. Paths are opaque keys; no normalisation is done.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    files: BTreeMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored files
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Borrow the whole path -> content map
    pub fn snapshot(&self) -> &BTreeMap<String, String> {
        &self.files
    }
}

impl FileStore for MemoryStore {
    fn create(&mut self, path: &str, content: &str) -> StoreResult<()> {
        self.files.insert(path.to_string(), content.to_string());
        tracing::info!(path, content, "file created");
        Ok(())
    }

    fn exists(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    fn delete(&mut self, path: &str) -> StoreResult<()> {
        match self.files.remove(path) {
            Some(_) => {
                tracing::info!(path, "file deleted");
                Ok(())
            }
            None => {
                tracing::warn!(path, "delete skipped, file does not exist");
                Err(StoreError::NotFound(path.to_string()))
            }
        }
    }

    fn rename(&mut self, old_path: &str, new_path: &str) -> StoreResult<()> {
        let content = self.files.remove(old_path).ok_or_else(|| {
            tracing::warn!(path = old_path, "rename skipped, file does not exist");
            StoreError::NotFound(old_path.to_string())
        })?;

        // An existing new_path is overwritten
        self.files.insert(new_path.to_string(), content);
        tracing::info!(from = old_path, to = new_path, "file renamed");
        Ok(())
    }

    fn read(&self, path: &str) -> StoreResult<Option<String>> {
        Ok(self.files.get(path).cloned())
    }

    fn paths(&self) -> StoreResult<Vec<String>> {
        Ok(self.files.keys().cloned().collect())
    }
}

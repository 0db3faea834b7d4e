//! In-memory project store.

use super::{ProjectStore, StorageError, StorageResult};
use crate::project::Project;
use std::collections::HashMap;
use std::sync::RwLock;

/// Keeps serialized documents in memory, for tests and scratch sessions.
///
/// Projects are stored as JSON so a load goes through the same parser as a file.
#[derive(Default)]
pub struct MemoryStorage {
    documents: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(e: impl std::fmt::Display) -> StorageError {
    StorageError::Other(format!("Lock error: {}", e))
}

impl ProjectStore for MemoryStorage {
    fn save(&self, name: &str, project: &Project) -> StorageResult<()> {
        let json = project
            .to_json()
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        let mut docs = self.documents.write().map_err(lock_error)?;
        docs.insert(name.to_string(), json);
        Ok(())
    }

    fn load(&self, name: &str) -> StorageResult<Project> {
        let docs = self.documents.read().map_err(lock_error)?;
        let json = docs
            .get(name)
            .ok_or_else(|| StorageError::NotFound(name.to_string()))?;
        Project::from_json(json).map_err(|e| StorageError::Serialization(e.to_string()))
    }

    fn delete(&self, name: &str) -> StorageResult<()> {
        let mut docs = self.documents.write().map_err(lock_error)?;
        docs.remove(name);
        Ok(())
    }

    fn list(&self) -> StorageResult<Vec<String>> {
        let docs = self.documents.read().map_err(lock_error)?;
        Ok(docs.keys().cloned().collect())
    }

    fn exists(&self, name: &str) -> StorageResult<bool> {
        let docs = self.documents.read().map_err(lock_error)?;
        Ok(docs.contains_key(name))
    }
}

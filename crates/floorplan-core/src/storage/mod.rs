//! Persistence for project documents.

mod memory;

#[cfg(not(target_arch = "wasm32"))]
mod file;

pub use memory::MemoryStorage;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStorage;

use crate::project::Project;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Project not found: {0}")]
    NotFound(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Storage error: {0}")]
    Other(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// A named collection of saved projects.
pub trait ProjectStore: Send + Sync {
    /// Save a project under `name`, replacing any previous one.
    fn save(&self, name: &str, project: &Project) -> StorageResult<()>;

    /// Load the project saved under `name`.
    fn load(&self, name: &str) -> StorageResult<Project>;

    /// Delete a project. Deleting a missing project is not an error.
    fn delete(&self, name: &str) -> StorageResult<()>;

    /// List saved project names.
    fn list(&self) -> StorageResult<Vec<String>>;

    fn exists(&self, name: &str) -> StorageResult<bool>;
}

/// Write a project document to an explicit path.
pub fn save_to_path(path: impl AsRef<Path>, project: &Project) -> StorageResult<()> {
    let path = path.as_ref();
    let json = project
        .to_json()
        .map_err(|e| StorageError::Serialization(e.to_string()))?;
    fs::write(path, json)
        .map_err(|e| StorageError::Io(format!("Failed to write {}: {}", path.display(), e)))?;
    log::info!("Saved {} shapes to {}", project.shapes.len(), path.display());
    Ok(())
}

/// Read a project document from an explicit path.
pub fn load_from_path(path: impl AsRef<Path>) -> StorageResult<Project> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(StorageError::NotFound(path.display().to_string()));
    }
    let json = fs::read_to_string(path)
        .map_err(|e| StorageError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
    let project = Project::from_json(&json).map_err(|e| {
        StorageError::Serialization(format!("Failed to parse {}: {}", path.display(), e))
    })?;
    log::info!("Loaded {} shapes from {}", project.shapes.len(), path.display());
    Ok(project)
}

//! Storage abstraction for persistence.
//!
//! A storage is a flat key-value store of JSON text. The canvas writes its
//! whole document under a single key.

mod memory;

#[cfg(not(target_arch = "wasm32"))]
mod file;

pub use memory::MemoryStorage;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStorage;

use thiserror::Error;

/// Key the canvas document is stored under by default.
pub const CANVAS_STORAGE_KEY: &str = "canvas-elements";

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Document not found: {0}")]
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

/// Trait for document storage backends.
///
/// Implementations can store documents in memory, on the filesystem, or in
/// any other key-value store. Calls are synchronous.
pub trait Storage: Send + Sync {
    /// Store `contents` under `key`, replacing any previous value.
    fn save(&self, key: &str, contents: &str) -> StorageResult<()>;

    /// Read the value stored under `key`.
    fn load(&self, key: &str) -> StorageResult<String>;

    /// Remove the value under `key`. Missing keys are not an error.
    fn delete(&self, key: &str) -> StorageResult<()>;

    /// List all stored keys.
    fn list(&self) -> StorageResult<Vec<String>>;

    /// Check if a key exists.
    fn exists(&self, key: &str) -> StorageResult<bool>;
}

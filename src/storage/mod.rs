//! # Persistence Surface
//!
//! A synchronous get/set-by-key store for JSON values. Each collection actor reads
//! its whole collection under one key at start-up and writes the whole collection
//! back after every successful mutation. There are no transactions, no partial
//! updates and no schema versions.
//!
//! - [`MemoryStore`] keeps serialized values in memory (tests, throwaway sessions).
//! - [`FileStore`] keeps one `<key>.json` file per key inside a directory.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use serde_json::Value;
use std::path::PathBuf;
use thiserror::Error;

/// Key under which projects are persisted.
pub const PROJECTS_KEY: &str = "pm_projects";
/// Key under which tasks are persisted.
pub const TASKS_KEY: &str = "pm_tasks";
/// Key under which the resource ledger is persisted.
pub const RESOURCES_KEY: &str = "pm_resources";

/// Errors raised by a [`KeyValueStore`].
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),

    #[error("Storage I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Corrupt value under key {key}: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode value for key {key}: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Storage lock poisoned")]
    Poisoned,
}

/// Synchronous key-value persistence for JSON values.
pub trait KeyValueStore: Send + Sync {
    /// Returns the value under `key`, or `None` if absent.
    ///
    /// A value that exists but cannot be parsed is reported as
    /// [`StorageError::Corrupt`]; callers decide whether to fall back to a default.
    fn get(&self, key: &str) -> Result<Option<Value>, StorageError>;

    /// Replaces the value under `key`.
    fn set(&self, key: &str, value: &Value) -> Result<(), StorageError>;

    /// Removes `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Keys are used as file names, so they are restricted to `[A-Za-z0-9_-]`.
pub(crate) fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}

//! Key/value storage capability.
//!
//! The inventory store only needs three operations on a single string slot. This
//! module abstracts them so the store runs the same against a browser's
//! `localStorage`, a directory on disk, or memory in tests.

use std::sync::Arc;

use thiserror::Error;

#[cfg(target_arch = "wasm32")]
pub mod browser;
#[cfg(not(target_arch = "wasm32"))]
pub mod file;
pub mod in_memory;

#[cfg(target_arch = "wasm32")]
pub use browser::BrowserStorage;
#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStorage;
pub use in_memory::InMemoryStorage;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),

    #[error("invalid storage key {0:?}")]
    InvalidKey(String),

    #[error("storage write rejected: {0}")]
    WriteRejected(String),

    #[error("storage io error at {path}: {source}")]
    Io {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Durable string slots addressed by key (last writer wins).
pub trait KeyValueStorage {
    /// Read a slot; `Ok(None)` when nothing was ever stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Overwrite a slot with `value`.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove a slot. Removing a missing slot is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

impl<S> KeyValueStorage for Arc<S>
where
    S: KeyValueStorage + ?Sized,
{
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

impl<S> KeyValueStorage for &S
where
    S: KeyValueStorage + ?Sized,
{
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

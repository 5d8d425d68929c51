//! Storage configuration for native (non-browser) builds.

use std::path::PathBuf;

use anyhow::Context;

use crate::storage::FileStorage;
use crate::store::{InventoryStore, STORAGE_KEY};

/// Overrides the directory holding the inventory slot file.
pub const DATA_DIR_ENV: &str = "STOCKROOM_DATA_DIR";
/// Overrides the slot key (and so the file name).
pub const STORAGE_KEY_ENV: &str = "STOCKROOM_STORAGE_KEY";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
    pub storage_key: String,
}

impl StorageConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            storage_key: STORAGE_KEY.to_string(),
        }
    }

    /// Read `STOCKROOM_DATA_DIR` / `STOCKROOM_STORAGE_KEY`, falling back to defaults.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let non_blank = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let data_dir = match non_blank(DATA_DIR_ENV) {
            Some(dir) => PathBuf::from(dir),
            None => default_data_dir()?,
        };
        let storage_key = non_blank(STORAGE_KEY_ENV).unwrap_or_else(|| STORAGE_KEY.to_string());

        Ok(Self {
            data_dir,
            storage_key,
        })
    }

    /// Open the file-backed store this config points at.
    pub fn open_store(&self) -> anyhow::Result<InventoryStore<FileStorage>> {
        let storage = FileStorage::open(&self.data_dir).with_context(|| {
            format!("failed to open inventory data directory at {:?}", self.data_dir)
        })?;
        Ok(InventoryStore::with_key(storage, self.storage_key.clone()))
    }
}

/// `{app_data_dir}/stockroom`.
fn default_data_dir() -> anyhow::Result<PathBuf> {
    let mut dir = dirs::data_dir()
        .or_else(|| {
            dirs::home_dir().map(|mut h| {
                h.push(".local");
                h.push("share");
                h
            })
        })
        .context("failed to resolve OS app data directory - tried data_dir() and home_dir()/.local/share")?;
    dir.push("stockroom");
    Ok(dir)
}

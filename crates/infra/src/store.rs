//! Single-slot inventory store.
//!
//! The whole ordered record list lives under one key. Every `load` is a full read
//! and parse; every `save` is a full rewrite. Nothing is cached between calls.

use serde_json::Value as JsonValue;
use thiserror::Error;

use stockroom_inventory::InventoryRecord;

use crate::storage::{KeyValueStorage, StorageError};

/// Key of the persisted inventory slot.
pub const STORAGE_KEY: &str = "ims_inventory";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("stored inventory is malformed: {0}")]
    Malformed(#[source] serde_json::Error),

    #[error("failed to serialize inventory: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Durable list of inventory records over an injected storage backend.
#[derive(Debug, Clone)]
pub struct InventoryStore<S> {
    storage: S,
    key: String,
}

impl<S> InventoryStore<S>
where
    S: KeyValueStorage,
{
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, STORAGE_KEY)
    }

    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Strict load: a missing or blank slot is an empty list, anything unparsable is an error.
    ///
    /// Records stored without an `id` are given one, and the slot is rewritten
    /// once so the same ids come back on the next load.
    pub fn try_load(&self) -> Result<Vec<InventoryRecord>, StoreError> {
        let raw = match self.storage.get(&self.key)? {
            Some(raw) if !raw.trim().is_empty() => raw,
            _ => return Ok(Vec::new()),
        };
        let entries: Vec<JsonValue> = serde_json::from_str(&raw).map_err(StoreError::Malformed)?;
        let unassigned = entries.iter().filter(|e| e.get("id").is_none()).count();
        let records: Vec<InventoryRecord> =
            serde_json::from_value(JsonValue::Array(entries)).map_err(StoreError::Malformed)?;

        if unassigned > 0 {
            match self.save(&records) {
                Ok(()) => tracing::info!(key = %self.key, unassigned, "assigned ids to stored records"),
                Err(err) => tracing::warn!(
                    key = %self.key,
                    error = %err,
                    "failed to persist assigned record ids"
                ),
            }
        }

        tracing::debug!(key = %self.key, count = records.len(), "inventory loaded");
        Ok(records)
    }

    /// Load the record list, degrading to an empty list if it cannot be read.
    ///
    /// For display only. Anything that writes back should use [`Self::try_load`]
    /// so an unreadable slot is never overwritten.
    pub fn load(&self) -> Vec<InventoryRecord> {
        match self.try_load() {
            Ok(records) => records,
            Err(err) => {
                tracing::warn!(
                    key = %self.key,
                    error = %err,
                    "inventory could not be loaded; treating as empty"
                );
                Vec::new()
            }
        }
    }

    /// Overwrite the slot with the full ordered list.
    pub fn save(&self, records: &[InventoryRecord]) -> Result<(), StoreError> {
        let payload = serde_json::to_string(records).map_err(StoreError::Serialize)?;
        self.storage.set(&self.key, &payload)?;
        tracing::debug!(key = %self.key, count = records.len(), "inventory saved");
        Ok(())
    }

    /// Remove the slot entirely. Irreversible.
    pub fn clear(&self) -> Result<(), StoreError> {
        self.storage.remove(&self.key)?;
        tracing::info!(key = %self.key, "inventory cleared");
        Ok(())
    }
}

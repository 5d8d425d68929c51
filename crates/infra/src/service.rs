//! Inventory operations exposed to the rendering layer.
//!
//! The service owns no state besides its store and encoder: every call re-reads
//! the persisted list, and every mutation writes the whole list back before it
//! returns. Records are addressed by `RecordId`, never by table position.
//!
//! Reads degrade to an empty list when the slot cannot be parsed. Mutations
//! fail instead, leaving the slot as it was; `clear_all` is the way out.

use chrono::Utc;
use thiserror::Error;

use stockroom_core::{DomainError, entity::position_of};
use stockroom_inventory::{
    ExportError, InventoryAggregate, InventoryRecord, InventorySummary, ItemDraft, RecordFilter,
    RecordId, StockOverview, aggregate, export_csv,
};

use crate::image::{DataUrlEncoder, ImageEncoder, ImageError, ImageUpload};
use crate::storage::KeyValueStorage;
use crate::store::{InventoryStore, StoreError};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Image(#[from] ImageError),

    #[error(transparent)]
    Export(#[from] ExportError),
}

impl ServiceError {
    /// True when the caller should show the message next to the form.
    pub fn is_validation(&self) -> bool {
        matches!(self, ServiceError::Domain(e) if e.is_validation())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ServiceError::Domain(DomainError::NotFound))
    }
}

/// The functional surface over one inventory slot.
#[derive(Debug, Clone)]
pub struct InventoryService<S, E = DataUrlEncoder> {
    store: InventoryStore<S>,
    encoder: E,
}

impl<S> InventoryService<S>
where
    S: KeyValueStorage,
{
    pub fn new(store: InventoryStore<S>) -> Self {
        Self::with_encoder(store, DataUrlEncoder)
    }
}

impl<S, E> InventoryService<S, E>
where
    S: KeyValueStorage,
    E: ImageEncoder,
{
    pub fn with_encoder(store: InventoryStore<S>, encoder: E) -> Self {
        Self { store, encoder }
    }

    pub fn store(&self) -> &InventoryStore<S> {
        &self.store
    }

    /// All records matching `filter`, in insertion order.
    pub fn list(&self, filter: &RecordFilter) -> Vec<InventoryRecord> {
        filter.apply(self.store.load())
    }

    pub fn get(&self, id: RecordId) -> Result<InventoryRecord, ServiceError> {
        self.store
            .load()
            .into_iter()
            .find(|r| r.id == id)
            .ok_or_else(|| DomainError::not_found().into())
    }

    /// Validate, encode the image (if any), then append and persist.
    ///
    /// Nothing is written unless validation and encoding both succeed.
    pub async fn add_item(
        &self,
        draft: &ItemDraft,
        image: Option<&ImageUpload>,
    ) -> Result<InventoryRecord, ServiceError> {
        let item = draft.validate()?;
        let image_data = self.encode(image).await?;

        let record = InventoryRecord::create(RecordId::generate(), item, image_data, Utc::now());
        let mut records = self.store.try_load()?;
        records.push(record.clone());
        self.store.save(&records)?;

        tracing::info!(record_id = %record.id, sku = %record.sku, "inventory item added");
        Ok(record)
    }

    /// Replace the editable fields of an existing record.
    ///
    /// Keeps the record's id, creation time, position, and (without a new upload) image.
    pub async fn update_item(
        &self,
        id: RecordId,
        draft: &ItemDraft,
        image: Option<&ImageUpload>,
    ) -> Result<InventoryRecord, ServiceError> {
        let item = draft.validate()?;
        let image_data = self.encode(image).await?;

        let mut records = self.store.try_load()?;
        let idx = position_of(&records, &id).ok_or_else(DomainError::not_found)?;
        records[idx].revise(item, image_data);
        let updated = records[idx].clone();
        self.store.save(&records)?;

        tracing::info!(record_id = %id, "inventory item updated");
        Ok(updated)
    }

    /// Remove one record; the rest keep their relative order.
    pub fn delete_item(&self, id: RecordId) -> Result<InventoryRecord, ServiceError> {
        let mut records = self.store.try_load()?;
        let idx = position_of(&records, &id).ok_or_else(DomainError::not_found)?;
        let removed = records.remove(idx);
        self.store.save(&records)?;

        tracing::info!(record_id = %id, sku = %removed.sku, "inventory item deleted");
        Ok(removed)
    }

    pub fn aggregate(&self, filter: &RecordFilter) -> InventoryAggregate {
        aggregate(&self.list(filter))
    }

    /// Home page numbers over the full list.
    pub fn overview(&self) -> StockOverview {
        aggregate(&self.store.load()).overview()
    }

    /// Inventory page numbers over the full list.
    pub fn summary(&self) -> InventorySummary {
        aggregate(&self.store.load()).summary()
    }

    pub fn export_csv(&self) -> Result<String, ServiceError> {
        Ok(export_csv(&self.store.load())?)
    }

    /// Drop every record. Irreversible.
    pub fn clear_all(&self) -> Result<(), ServiceError> {
        self.store.clear()?;
        Ok(())
    }

    async fn encode(&self, image: Option<&ImageUpload>) -> Result<Option<String>, ServiceError> {
        match image {
            Some(upload) => Ok(Some(self.encoder.encode(upload).await?)),
            None => Ok(None),
        }
    }
}

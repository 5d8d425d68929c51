//! Inventory collection engine.
//!
//! This crate contains the record model and the query engine for inventory,
//! implemented purely as deterministic domain logic (no IO, no browser, no
//! storage). Persistence lives in `stockroom-infra`.

pub mod draft;
pub mod export;
pub mod format;
pub mod query;
pub mod record;
pub mod status;

pub use draft::{ItemDraft, ValidatedItem, generate_sku};
pub use export::{CSV_HEADER, ExportError, export_csv};
pub use format::{format_currency, format_date};
pub use query::{
    InventoryAggregate, InventorySummary, RecordFilter, StockOverview, aggregate, apply_filters,
    filter_by_category, filter_by_term,
};
pub use record::{InventoryRecord, RecordId, StoredNumber, StoredRepr};
pub use status::{LOW_STOCK_THRESHOLD, StockStatus};

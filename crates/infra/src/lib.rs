//! `stockroom-infra`
//!
//! **Responsibility:** persistence and the functional surface used by the UI layer.
//!
//! This crate provides:
//! - An injectable key/value storage capability (in-memory, file, browser `localStorage`)
//! - The single-slot inventory store (`load` / `save` / `clear`)
//! - Async image encoding for the add-item flow
//! - `InventoryService`, the operations the rendering layer calls

#[cfg(not(target_arch = "wasm32"))]
pub mod config;
pub mod image;
pub mod service;
pub mod storage;
pub mod store;

#[cfg(not(target_arch = "wasm32"))]
pub use config::StorageConfig;
pub use image::{DataUrlEncoder, ImageEncoder, ImageError, ImageUpload};
pub use service::{InventoryService, ServiceError};
pub use storage::{InMemoryStorage, KeyValueStorage, StorageError};
#[cfg(target_arch = "wasm32")]
pub use storage::BrowserStorage;
#[cfg(not(target_arch = "wasm32"))]
pub use storage::FileStorage;
pub use store::{InventoryStore, STORAGE_KEY, StoreError};

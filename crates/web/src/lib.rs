//! `stockroom-web`
//!
//! **Responsibility:** expose the inventory service to the browser page.
//!
//! The HTML/JS page owns rendering, forms, and routing. It calls the exported
//! `InventoryApp` methods, which read and write `window.localStorage` through
//! `stockroom-infra` and hand back plain JS objects. Native builds compile this
//! crate to nothing but the row view model.

pub mod view;

#[cfg(target_arch = "wasm32")]
mod bindings;

#[cfg(target_arch = "wasm32")]
pub use bindings::InventoryApp;
pub use view::ItemRow;

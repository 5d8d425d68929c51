//! `wasm-bindgen` surface used by the inventory page.

use std::rc::Rc;

use js_sys::Promise;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;

use stockroom_infra::{BrowserStorage, ImageUpload, InventoryService, InventoryStore};
use stockroom_inventory::{ItemDraft, RecordFilter, RecordId, generate_sku};

use crate::view::ItemRow;

type Service = InventoryService<BrowserStorage>;

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
}

/// Inventory handle backed by `window.localStorage`.
#[wasm_bindgen]
pub struct InventoryApp {
    service: Rc<Service>,
}

#[wasm_bindgen]
impl InventoryApp {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<InventoryApp, JsError> {
        let storage = BrowserStorage::local().map_err(js_error)?;
        Ok(Self {
            service: Rc::new(InventoryService::new(InventoryStore::new(storage))),
        })
    }

    /// Rows matching the search box and category select, in insertion order.
    #[wasm_bindgen(js_name = listItems)]
    pub fn list_items(&self, term: Option<String>, category: Option<String>) -> Result<JsValue, JsError> {
        let filter = RecordFilter::new()
            .term(term.unwrap_or_default())
            .category(category.unwrap_or_default());
        let rows: Vec<ItemRow> = self.service.list(&filter).iter().map(ItemRow::from).collect();
        to_js(&rows)
    }

    /// Resolves to the new row, or rejects with the validation message.
    #[wasm_bindgen(js_name = addItem)]
    pub fn add_item(
        &self,
        draft: JsValue,
        image: Option<Vec<u8>>,
        image_type: Option<String>,
        image_name: Option<String>,
    ) -> Result<Promise, JsError> {
        let draft: ItemDraft = serde_wasm_bindgen::from_value(draft).map_err(js_error)?;
        let upload = upload(image, image_type, image_name);
        let service = Rc::clone(&self.service);

        Ok(future_to_promise(async move {
            let record = service
                .add_item(&draft, upload.as_ref())
                .await
                .map_err(|e| JsValue::from(js_error(e)))?;
            to_js(&ItemRow::from(&record)).map_err(JsValue::from)
        }))
    }

    #[wasm_bindgen(js_name = updateItem)]
    pub fn update_item(
        &self,
        id: &str,
        draft: JsValue,
        image: Option<Vec<u8>>,
        image_type: Option<String>,
        image_name: Option<String>,
    ) -> Result<Promise, JsError> {
        let id: RecordId = id.parse().map_err(js_error)?;
        let draft: ItemDraft = serde_wasm_bindgen::from_value(draft).map_err(js_error)?;
        let upload = upload(image, image_type, image_name);
        let service = Rc::clone(&self.service);

        Ok(future_to_promise(async move {
            let record = service
                .update_item(id, &draft, upload.as_ref())
                .await
                .map_err(|e| JsValue::from(js_error(e)))?;
            to_js(&ItemRow::from(&record)).map_err(JsValue::from)
        }))
    }

    #[wasm_bindgen(js_name = deleteItem)]
    pub fn delete_item(&self, id: &str) -> Result<(), JsError> {
        let id: RecordId = id.parse().map_err(js_error)?;
        self.service.delete_item(id).map_err(js_error)?;
        Ok(())
    }

    /// `{ total, inStock, lowStock }` for the home page cards.
    pub fn overview(&self) -> Result<JsValue, JsError> {
        to_js(&self.service.overview())
    }

    /// `{ total, value, inStock }` for the inventory page header.
    pub fn summary(&self) -> Result<JsValue, JsError> {
        to_js(&self.service.summary())
    }

    #[wasm_bindgen(js_name = exportCsv)]
    pub fn export_csv(&self) -> Result<String, JsError> {
        self.service.export_csv().map_err(js_error)
    }

    /// Suggested SKU for the Add-Item form.
    #[wasm_bindgen(js_name = generateSku)]
    pub fn generate_sku() -> String {
        generate_sku(chrono::Utc::now())
    }

    #[wasm_bindgen(js_name = clearAll)]
    pub fn clear_all(&self) -> Result<(), JsError> {
        self.service.clear_all().map_err(js_error)
    }
}

fn upload(bytes: Option<Vec<u8>>, mime: Option<String>, name: Option<String>) -> Option<ImageUpload> {
    let bytes = bytes.filter(|b| !b.is_empty())?;
    let upload = ImageUpload::new(mime.unwrap_or_default(), bytes);
    Some(match name {
        Some(name) => upload.with_fallback_type(&name),
        None => upload,
    })
}

fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, JsError> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(js_error)
}

fn js_error(err: impl std::fmt::Display) -> JsError {
    JsError::new(&err.to_string())
}

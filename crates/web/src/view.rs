//! Table row view model handed to the page.

use serde::Serialize;

use stockroom_inventory::{InventoryRecord, format_currency};

/// One inventory table row, ready to render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRow {
    pub id: String,
    pub name: String,
    pub sku: String,
    pub category: String,
    /// `$9.99`, or the raw stored text when the price is not a number.
    pub price: String,
    pub quantity: String,
    pub status_label: &'static str,
    pub status_class: &'static str,
    pub image_data: Option<String>,
}

impl From<&InventoryRecord> for ItemRow {
    fn from(record: &InventoryRecord) -> Self {
        let price = match record.price_value() {
            Some(p) => format_currency(p),
            None => record.price.to_string(),
        };
        let (status_label, status_class) = match record.stock_status() {
            Some(status) => (status.label(), status.css_class()),
            None => ("Unknown", "unknown"),
        };
        Self {
            id: record.id.to_string(),
            name: record.name.clone(),
            sku: record.sku.clone(),
            category: record.category.clone(),
            price,
            quantity: record.quantity.to_string(),
            status_label,
            status_class,
            image_data: record.image_data.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use stockroom_inventory::{ItemDraft, RecordId};

    fn widget() -> InventoryRecord {
        let draft = ItemDraft {
            name: "Widget".to_string(),
            sku: "W-1".to_string(),
            category: "Tools".to_string(),
            price: "9.9".to_string(),
            quantity: "0".to_string(),
            ..ItemDraft::default()
        };
        let item = draft.validate().unwrap();
        InventoryRecord::create(RecordId::generate(), item, None, Utc::now())
    }

    #[test]
    fn row_formats_price_and_status() {
        let record = widget();
        let row = ItemRow::from(&record);
        assert_eq!(row.id, record.id.to_string());
        assert_eq!(row.price, "$9.90");
        assert_eq!(row.quantity, "0");
        assert_eq!(row.status_label, "Out of Stock");
        assert_eq!(row.status_class, "out-of-stock");
    }
}

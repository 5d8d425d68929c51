//! Comma-separated export of the record list.

use csv::{QuoteStyle, Terminator, WriterBuilder};
use thiserror::Error;

use crate::record::{InventoryRecord, StoredNumber};

pub const CSV_HEADER: [&str; 6] = ["Name", "SKU", "Category", "Price", "Quantity", "Status"];

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write csv row: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to flush csv buffer: {0}")]
    Flush(String),

    #[error("csv output is not valid utf-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Render `records` as CSV, one row per record in list order.
///
/// Name, SKU, category and status are always quoted. Price and quantity are
/// written bare when they are numbers and quoted when the stored text is not.
/// The status column is derived from quantity (`Unknown` when it is not a number).
pub fn export_csv(records: &[InventoryRecord]) -> Result<String, ExportError> {
    // Quoting is decided per cell below, so the writer itself never quotes.
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Never)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADER)?;
    for record in records {
        let status = record.stock_status().map_or("Unknown", |s| s.label());
        writer.write_record([
            quoted(&record.name),
            quoted(&record.sku),
            quoted(&record.category),
            numeric_cell(&record.price),
            numeric_cell(&record.quantity),
            quoted(status),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Flush(e.to_string()))?;
    Ok(String::from_utf8(bytes)?)
}

fn quoted(text: &str) -> String {
    format!("\"{}\"", text.replace('"', "\"\""))
}

fn numeric_cell<T: core::fmt::Display>(value: &StoredNumber<T>) -> String {
    match value {
        StoredNumber::Valid(v) => v.to_string(),
        StoredNumber::Invalid(_) => quoted(&value.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::RecordId;
    use chrono::Utc;
    use rust_decimal::Decimal;
    use serde_json::json;
    use std::collections::BTreeSet;

    fn record(name: &str, price: StoredNumber<Decimal>, quantity: StoredNumber<u64>) -> InventoryRecord {
        InventoryRecord {
            id: RecordId::generate(),
            name: name.to_string(),
            sku: "W-1".to_string(),
            category: "Tools".to_string(),
            description: None,
            price,
            quantity,
            status: String::new(),
            flags: BTreeSet::new(),
            image_data: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn empty_list_exports_header_only() {
        let csv = export_csv(&[]).unwrap();
        assert_eq!(csv, "Name,SKU,Category,Price,Quantity,Status\n");
    }

    #[test]
    fn rows_carry_derived_status() {
        let records = vec![
            record("Widget", Decimal::new(999, 2).into(), 5.into()),
            record("Crate", Decimal::new(4000, 2).into(), 0.into()),
        ];
        let csv = export_csv(&records).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "\"Widget\",\"W-1\",\"Tools\",9.99,5,\"Low Stock\"");
        assert_eq!(lines[2], "\"Crate\",\"W-1\",\"Tools\",40.00,0,\"Out of Stock\"");
    }

    #[test]
    fn embedded_quotes_are_escaped() {
        let records = vec![record("Big \"Bolt\", zinc", Decimal::ONE.into(), 11.into())];
        let csv = export_csv(&records).unwrap();
        assert!(csv.contains("\"Big \"\"Bolt\"\", zinc\""));
        assert!(csv.contains("\"In Stock\""));
    }

    #[test]
    fn numeric_looking_text_is_still_quoted() {
        let mut item = record("123", Decimal::new(5, 0).into(), 12.into());
        item.sku = "0042".to_string();
        item.category = "7".to_string();
        let csv = export_csv(&[item]).unwrap();
        assert_eq!(csv.lines().nth(1), Some("\"123\",\"0042\",\"7\",5,12,\"In Stock\""));
    }

    #[test]
    fn invalid_quantity_exports_raw_text_and_unknown_status() {
        let records = vec![record(
            "Widget",
            Decimal::new(999, 2).into(),
            StoredNumber::Invalid(json!("lots")),
        )];
        let csv = export_csv(&records).unwrap();
        assert!(csv.ends_with("\"lots\",\"Unknown\"\n"));
    }
}

//! Query engine: filtering and aggregates over a record sequence.
//!
//! Every function here is a pure transform over its input. Filters preserve the
//! relative order of the records they keep.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::record::InventoryRecord;
use crate::status::LOW_STOCK_THRESHOLD;

/// Keep records whose name, sku or category contains `term` (case-insensitive).
///
/// A blank term keeps everything. Otherwise the term is matched as typed,
/// surrounding spaces included.
pub fn filter_by_term(mut records: Vec<InventoryRecord>, term: &str) -> Vec<InventoryRecord> {
    if term.trim().is_empty() {
        return records;
    }
    let needle = term.to_lowercase();
    records.retain(|r| matches_term(r, &needle));
    records
}

/// Keep records whose category equals `category` exactly. Empty keeps everything.
pub fn filter_by_category(
    mut records: Vec<InventoryRecord>,
    category: &str,
) -> Vec<InventoryRecord> {
    if category.is_empty() {
        return records;
    }
    records.retain(|r| r.category == category);
    records
}

/// Term filter, then category filter (both must match).
pub fn apply_filters(records: Vec<InventoryRecord>, term: &str, category: &str) -> Vec<InventoryRecord> {
    filter_by_category(filter_by_term(records, term), category)
}

fn matches_term(record: &InventoryRecord, needle: &str) -> bool {
    [&record.name, &record.sku, &record.category]
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
}

/// Filter criteria as selected in the inventory table header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordFilter {
    pub term: String,
    pub category: String,
}

impl RecordFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn term(mut self, term: impl Into<String>) -> Self {
        self.term = term.into();
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn is_empty(&self) -> bool {
        self.term.trim().is_empty() && self.category.is_empty()
    }

    pub fn apply(&self, records: Vec<InventoryRecord>) -> Vec<InventoryRecord> {
        apply_filters(records, &self.term, &self.category)
    }
}

/// Summary numbers over a record set.
///
/// `in_stock` counts every quantity above zero (low-stock items included), unlike
/// [`crate::StockStatus::InStock`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryAggregate {
    pub total: usize,
    pub in_stock: usize,
    pub low_stock: usize,
    pub value: Decimal,
    /// Records left out of the numeric aggregates because price or quantity is not a number.
    pub skipped: usize,
}

/// Home page numbers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockOverview {
    pub total: usize,
    pub in_stock: usize,
    pub low_stock: usize,
}

/// Inventory page numbers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventorySummary {
    pub total: usize,
    pub value: Decimal,
    pub in_stock: usize,
}

impl InventoryAggregate {
    pub fn overview(&self) -> StockOverview {
        StockOverview {
            total: self.total,
            in_stock: self.in_stock,
            low_stock: self.low_stock,
        }
    }

    pub fn summary(&self) -> InventorySummary {
        InventorySummary {
            total: self.total,
            value: self.value,
            in_stock: self.in_stock,
        }
    }
}

/// Compute counts and total value.
///
/// Records with a non-numeric price or quantity still count toward `total` but are
/// excluded from the numeric aggregates and logged as a data-integrity warning.
pub fn aggregate(records: &[InventoryRecord]) -> InventoryAggregate {
    let mut agg = InventoryAggregate {
        total: records.len(),
        ..InventoryAggregate::default()
    };

    for record in records {
        if let Some(quantity) = record.quantity_value() {
            if quantity > 0 {
                agg.in_stock += 1;
            }
            if (1..=LOW_STOCK_THRESHOLD).contains(&quantity) {
                agg.low_stock += 1;
            }
        }

        if !(record.price.is_valid() && record.quantity.is_valid()) {
            agg.skipped += 1;
            tracing::warn!(
                record_id = %record.id,
                sku = %record.sku,
                price = %record.price,
                quantity = %record.quantity,
                "record excluded from inventory value: non-numeric price or quantity"
            );
            continue;
        }

        match record.line_value().and_then(|line| agg.value.checked_add(line)) {
            Some(value) => agg.value = value,
            None => {
                agg.skipped += 1;
                tracing::warn!(
                    record_id = %record.id,
                    sku = %record.sku,
                    price = %record.price,
                    quantity = %record.quantity,
                    "record excluded from inventory value: value out of range"
                );
            }
        }
    }

    agg
}

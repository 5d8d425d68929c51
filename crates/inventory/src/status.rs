use serde::{Deserialize, Serialize};

use stockroom_core::ValueObject;

/// Highest quantity still reported as low stock (inclusive).
pub const LOW_STOCK_THRESHOLD: u64 = 10;

/// Derived three-way stock classification.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StockStatus {
    OutOfStock,
    LowStock,
    InStock,
}

impl ValueObject for StockStatus {}

impl StockStatus {
    /// Classify a quantity: `0` is out of stock, `1..=10` is low, anything above is in stock.
    pub fn classify(quantity: u64) -> Self {
        match quantity {
            0 => StockStatus::OutOfStock,
            1..=LOW_STOCK_THRESHOLD => StockStatus::LowStock,
            _ => StockStatus::InStock,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StockStatus::OutOfStock => "Out of Stock",
            StockStatus::LowStock => "Low Stock",
            StockStatus::InStock => "In Stock",
        }
    }

    /// Slug used by the rendering layer for badge styling.
    pub fn css_class(&self) -> &'static str {
        match self {
            StockStatus::OutOfStock => "out-of-stock",
            StockStatus::LowStock => "low-stock",
            StockStatus::InStock => "in-stock",
        }
    }
}

impl core::fmt::Display for StockStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn boundaries_are_exact() {
        assert_eq!(StockStatus::classify(0), StockStatus::OutOfStock);
        assert_eq!(StockStatus::classify(1), StockStatus::LowStock);
        assert_eq!(StockStatus::classify(10), StockStatus::LowStock);
        assert_eq!(StockStatus::classify(11), StockStatus::InStock);
    }

    #[test]
    fn labels_match_badges() {
        assert_eq!(StockStatus::OutOfStock.to_string(), "Out of Stock");
        assert_eq!(StockStatus::LowStock.css_class(), "low-stock");
        assert_eq!(StockStatus::InStock.label(), "In Stock");
    }

    proptest! {
        #[test]
        fn low_stock_band_is_one_through_ten(q in 1u64..=LOW_STOCK_THRESHOLD) {
            prop_assert_eq!(StockStatus::classify(q), StockStatus::LowStock);
        }

        #[test]
        fn above_threshold_is_in_stock(q in (LOW_STOCK_THRESHOLD + 1)..u64::MAX) {
            prop_assert_eq!(StockStatus::classify(q), StockStatus::InStock);
        }
    }
}

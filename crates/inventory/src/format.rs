//! Display helpers for the rendering layer.

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};

/// `$` plus the amount rounded to cents, e.g. `$9.99`.
pub fn format_currency(amount: Decimal) -> String {
    let cents = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("${cents:.2}")
}

/// Short US-style date, e.g. `Jan 5, 2026`.
pub fn format_date(at: DateTime<Utc>) -> String {
    at.format("%b %-d, %Y").to_string()
}

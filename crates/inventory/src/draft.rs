use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use stockroom_core::{DomainError, DomainResult, EntityId};

/// Number of distinct five-character base-36 suffixes.
const SKU_SUFFIX_SPACE: u64 = 36u64.pow(5);

/// Raw Add-Item form input, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ItemDraft {
    pub name: String,
    pub sku: String,
    pub category: String,
    pub description: String,
    pub price: String,
    pub quantity: String,
    pub status: String,
    pub flags: Vec<String>,
}

/// A draft that passed validation; the only input a record can be built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedItem {
    pub name: String,
    pub sku: String,
    pub category: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub quantity: u64,
    pub status: String,
    pub flags: BTreeSet<String>,
}

impl ItemDraft {
    /// Fill a blank SKU with a generated one; a typed SKU is kept.
    pub fn with_generated_sku(mut self) -> Self {
        if self.sku.trim().is_empty() {
            self.sku = generate_sku(Utc::now());
        }
        self
    }

    /// Validate in form order; the first failing field is reported.
    pub fn validate(&self) -> DomainResult<ValidatedItem> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("item name is required"));
        }
        if self.sku.trim().is_empty() {
            return Err(DomainError::validation("sku is required"));
        }

        let price = parse_price(&self.price)?;
        let quantity = parse_quantity(&self.quantity)?;

        let description = match self.description.trim() {
            "" => None,
            _ => Some(self.description.clone()),
        };

        let flags = self
            .flags
            .iter()
            .map(|f| f.trim())
            .filter(|f| !f.is_empty())
            .map(str::to_string)
            .collect();

        Ok(ValidatedItem {
            name: self.name.clone(),
            sku: self.sku.clone(),
            category: self.category.clone(),
            description,
            price,
            quantity,
            status: self.status.clone(),
            flags,
        })
    }
}

/// `SKU-<base-36 millis>-<5 random base-36 chars>`, upper case.
pub fn generate_sku(at: DateTime<Utc>) -> String {
    // The low half of a v7 uuid is random.
    let entropy = EntityId::new().as_uuid().as_u128() as u64;
    format_sku(at.timestamp_millis(), entropy)
}

fn format_sku(millis: i64, entropy: u64) -> String {
    let stamp = base36(u64::try_from(millis).unwrap_or(0));
    format!("SKU-{stamp}-{:0>5}", base36(entropy % SKU_SUFFIX_SPACE))
}

fn base36(mut n: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
    let mut out = Vec::new();
    loop {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
        if n == 0 {
            break;
        }
    }
    out.reverse();
    String::from_utf8_lossy(&out).into_owned()
}

fn parse_price(raw: &str) -> DomainResult<Decimal> {
    let invalid = || DomainError::validation("price must be a positive number");
    let price: Decimal = raw.trim().parse().map_err(|_| invalid())?;
    if price <= Decimal::ZERO {
        return Err(invalid());
    }
    Ok(price)
}

fn parse_quantity(raw: &str) -> DomainResult<u64> {
    raw.trim()
        .parse::<u64>()
        .map_err(|_| DomainError::validation("quantity must be a non-negative whole number"))
}

use std::collections::BTreeSet;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value as JsonValue;

use stockroom_core::{DomainError, Entity, EntityId, ValueObject};

use crate::draft::ValidatedItem;
use crate::status::StockStatus;

/// Inventory record identifier, assigned once at creation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub EntityId);

impl RecordId {
    pub fn new(id: EntityId) -> Self {
        Self(id)
    }

    /// Fresh time-ordered identifier.
    pub fn generate() -> Self {
        Self(EntityId::new())
    }
}

impl core::fmt::Display for RecordId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for RecordId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<EntityId>().map(Self)
    }
}

/// How a numeric field is read from and written back to the persisted slot.
pub trait StoredRepr: FromStr + Copy {
    fn to_json(&self) -> JsonValue;

    fn from_number(n: &serde_json::Number) -> Option<Self> {
        n.to_string().parse().ok()
    }

    fn from_text(s: &str) -> Option<Self> {
        s.trim().parse().ok()
    }
}

impl StoredRepr for Decimal {
    // Strings keep the exact scale ("9.90" stays "9.90").
    fn to_json(&self) -> JsonValue {
        JsonValue::String(self.to_string())
    }
}

impl StoredRepr for u64 {
    fn to_json(&self) -> JsonValue {
        JsonValue::from(*self)
    }

    // `5.0` is a whole number.
    fn from_number(n: &serde_json::Number) -> Option<Self> {
        n.as_u64().or_else(|| n.as_f64().and_then(whole_u64))
    }

    fn from_text(s: &str) -> Option<Self> {
        let s = s.trim();
        s.parse().ok().or_else(|| {
            let d: Decimal = s.parse().ok()?;
            if d.fract().is_zero() { d.trunc().to_string().parse().ok() } else { None }
        })
    }
}

fn whole_u64(f: f64) -> Option<u64> {
    (f.fract() == 0.0 && f >= 0.0 && f < u64::MAX as f64).then(|| f as u64)
}

/// A numeric field as read back from storage.
///
/// JSON numbers and numeric strings both parse into `Valid`. Anything else is
/// retained verbatim as `Invalid` so that a later save writes it back untouched.
#[derive(Debug, Clone, PartialEq)]
pub enum StoredNumber<T> {
    Valid(T),
    Invalid(JsonValue),
}

impl<T: StoredRepr> StoredNumber<T> {
    pub fn from_json(raw: JsonValue) -> Self {
        let parsed = match &raw {
            JsonValue::Number(n) => T::from_number(n),
            JsonValue::String(s) => T::from_text(s),
            _ => None,
        };
        match parsed {
            Some(value) => StoredNumber::Valid(value),
            None => StoredNumber::Invalid(raw),
        }
    }

    pub fn value(&self) -> Option<T> {
        match self {
            StoredNumber::Valid(v) => Some(*v),
            StoredNumber::Invalid(_) => None,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, StoredNumber::Valid(_))
    }

    fn missing() -> Self {
        StoredNumber::Invalid(JsonValue::Null)
    }
}

impl<T> From<T> for StoredNumber<T> {
    fn from(value: T) -> Self {
        StoredNumber::Valid(value)
    }
}

impl<T: Clone + PartialEq + core::fmt::Debug> ValueObject for StoredNumber<T> {}

impl<T: core::fmt::Display> core::fmt::Display for StoredNumber<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            StoredNumber::Valid(v) => core::fmt::Display::fmt(v, f),
            StoredNumber::Invalid(JsonValue::String(s)) => f.write_str(s),
            StoredNumber::Invalid(JsonValue::Null) => Ok(()),
            StoredNumber::Invalid(other) => write!(f, "{other}"),
        }
    }
}

impl<T: StoredRepr> Serialize for StoredNumber<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            StoredNumber::Valid(v) => v.to_json().serialize(serializer),
            StoredNumber::Invalid(raw) => raw.serialize(serializer),
        }
    }
}

impl<'de, T: StoredRepr> Deserialize<'de> for StoredNumber<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = JsonValue::deserialize(deserializer)?;
        Ok(StoredNumber::from_json(raw))
    }
}

/// One tracked inventory item, exactly as persisted.
///
/// Field names serialize in camelCase (`imageData`, `createdAt`). Records saved
/// before ids existed get a fresh one when read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryRecord {
    #[serde(default = "RecordId::generate")]
    pub id: RecordId,
    pub name: String,
    pub sku: String,
    #[serde(default)]
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default = "StoredNumber::missing")]
    pub price: StoredNumber<Decimal>,
    #[serde(default = "StoredNumber::missing")]
    pub quantity: StoredNumber<u64>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub flags: BTreeSet<String>,
    /// Encoded image (data URL), `None` when no image was supplied.
    #[serde(default)]
    pub image_data: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl InventoryRecord {
    /// Build a record from an already validated draft.
    pub fn create(
        id: RecordId,
        item: ValidatedItem,
        image_data: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name: item.name,
            sku: item.sku,
            category: item.category,
            description: item.description,
            price: StoredNumber::Valid(item.price),
            quantity: StoredNumber::Valid(item.quantity),
            status: item.status,
            flags: item.flags,
            image_data,
            created_at,
        }
    }

    /// Replace the editable fields, keeping identity and creation time.
    ///
    /// The current image is kept unless a new one is given.
    pub fn revise(&mut self, item: ValidatedItem, image_data: Option<String>) {
        self.name = item.name;
        self.sku = item.sku;
        self.category = item.category;
        self.description = item.description;
        self.price = StoredNumber::Valid(item.price);
        self.quantity = StoredNumber::Valid(item.quantity);
        self.status = item.status;
        self.flags = item.flags;
        if image_data.is_some() {
            self.image_data = image_data;
        }
    }

    pub fn price_value(&self) -> Option<Decimal> {
        self.price.value()
    }

    pub fn quantity_value(&self) -> Option<u64> {
        self.quantity.value()
    }

    /// `None` when the stored quantity is not a whole number.
    pub fn stock_status(&self) -> Option<StockStatus> {
        self.quantity_value().map(StockStatus::classify)
    }

    /// `price * quantity`, or `None` if either field is unusable.
    pub fn line_value(&self) -> Option<Decimal> {
        let price = self.price_value()?;
        let quantity = self.quantity_value()?;
        price.checked_mul(Decimal::from(quantity))
    }

    pub fn has_image(&self) -> bool {
        self.image_data.is_some()
    }
}

impl Entity for InventoryRecord {
    type Id = RecordId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn test_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 5, 9, 30, 0).unwrap()
    }

    fn widget() -> InventoryRecord {
        InventoryRecord {
            id: RecordId::generate(),
            name: "Widget".to_string(),
            sku: "W-1".to_string(),
            category: "Tools".to_string(),
            description: None,
            price: StoredNumber::Valid(Decimal::new(999, 2)),
            quantity: StoredNumber::Valid(5),
            status: "active".to_string(),
            flags: BTreeSet::new(),
            image_data: None,
            created_at: test_time(),
        }
    }

    #[test]
    fn serializes_with_camel_case_and_null_image() {
        let value = serde_json::to_value(widget()).unwrap();
        assert_eq!(value["price"], json!("9.99"));
        assert_eq!(value["quantity"], json!(5));
        assert_eq!(value["imageData"], JsonValue::Null);
        assert!(value.get("createdAt").is_some());
        assert!(value.get("description").is_none());
    }

    #[test]
    fn accepts_numeric_strings_from_form_era_data() {
        let raw = json!({
            "id": RecordId::generate(),
            "name": "Widget",
            "sku": "W-1",
            "category": "Tools",
            "price": "9.99",
            "quantity": "5",
            "status": "active",
            "flags": ["fragile"],
            "imageData": null,
            "createdAt": "2026-01-05T09:30:00.000Z"
        });
        let record: InventoryRecord = serde_json::from_value(raw).unwrap();
        assert_eq!(record.price_value(), Some(Decimal::new(999, 2)));
        assert_eq!(record.quantity_value(), Some(5));
        assert_eq!(record.created_at, test_time());
        assert!(record.flags.contains("fragile"));
    }

    #[test]
    fn record_without_id_gets_a_fresh_one() {
        let raw = json!({
            "name": "Widget",
            "sku": "W-1",
            "category": "Tools",
            "description": "",
            "price": "9.99",
            "quantity": "5",
            "status": "active",
            "flags": [],
            "imageData": null,
            "createdAt": "2026-01-05T09:30:00.000Z"
        });
        let a: InventoryRecord = serde_json::from_value(raw.clone()).unwrap();
        let b: InventoryRecord = serde_json::from_value(raw).unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(a.name, "Widget");
        assert_eq!(a.quantity_value(), Some(5));
    }

    #[test]
    fn whole_float_quantity_is_valid() {
        assert_eq!(StoredNumber::<u64>::from_json(json!(5.0)), StoredNumber::Valid(5));
        assert_eq!(StoredNumber::<u64>::from_json(json!("12.0")), StoredNumber::Valid(12));
        assert!(!StoredNumber::<u64>::from_json(json!(5.5)).is_valid());
        assert!(!StoredNumber::<u64>::from_json(json!("2.25")).is_valid());
        assert!(!StoredNumber::<u64>::from_json(json!(-1.0)).is_valid());
    }

    #[test]
    fn keeps_non_numeric_values_verbatim() {
        let mut value = serde_json::to_value(widget()).unwrap();
        value["price"] = json!("call us");
        value["quantity"] = json!(-3);

        let record: InventoryRecord = serde_json::from_value(value).unwrap();
        assert_eq!(record.price, StoredNumber::Invalid(json!("call us")));
        assert_eq!(record.quantity, StoredNumber::Invalid(json!(-3)));
        assert_eq!(record.stock_status(), None);
        assert_eq!(record.line_value(), None);

        let back = serde_json::to_value(&record).unwrap();
        assert_eq!(back["price"], json!("call us"));
        assert_eq!(back["quantity"], json!(-3));
    }

    #[test]
    fn missing_price_is_invalid_not_an_error() {
        let mut value = serde_json::to_value(widget()).unwrap();
        value.as_object_mut().unwrap().remove("price");
        let record: InventoryRecord = serde_json::from_value(value).unwrap();
        assert!(!record.price.is_valid());
        assert_eq!(record.price.to_string(), "");
    }

    #[test]
    fn line_value_multiplies_exactly() {
        assert_eq!(widget().line_value(), Some(Decimal::new(4995, 2)));
    }

    #[test]
    fn revise_keeps_identity_and_image() {
        let mut record = widget();
        record.image_data = Some("data:image/png;base64,AAAA".to_string());
        let id = record.id;

        let item = ValidatedItem {
            name: "Widget XL".to_string(),
            sku: "W-2".to_string(),
            category: "Tools".to_string(),
            description: Some("bigger".to_string()),
            price: Decimal::new(1250, 2),
            quantity: 40,
            status: "active".to_string(),
            flags: BTreeSet::new(),
        };
        record.revise(item, None);

        assert_eq!(record.id, id);
        assert_eq!(record.created_at, test_time());
        assert_eq!(record.name, "Widget XL");
        assert_eq!(record.stock_status(), Some(StockStatus::InStock));
        assert!(record.has_image());
    }
}

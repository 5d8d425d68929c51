//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects have **no identity**: two instances with the same attribute
/// values are interchangeable. They are immutable; "changing" one means building
/// a new value.
///
/// - **Value Object**: `StockStatus::LowStock`, a stored price of `"9.99"`
/// - **Entity**: an inventory record with a `RecordId`
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}

//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. An axis value
/// such as `Color = "Silver"` is one: every variant that yields it shares the
/// same value, regardless of which SKU token produced it.
///
/// The trait requires `Clone`, `PartialEq` and `Debug` so values can be copied
/// into derived structures, compared during matching and logged.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}

/// Append `value` unless an equal value is already present.
///
/// Returns whether the value was added. Keeps first-seen order.
pub fn push_distinct<V: ValueObject>(values: &mut Vec<V>, value: V) -> bool {
    if values.contains(&value) {
        return false;
    }
    values.push(value);
    true
}

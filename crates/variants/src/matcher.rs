//! Exact matcher: change one axis, keep every other choice pinned.

use storefront_core::VariantId;

use crate::axis::AxisGrouping;
use crate::vocabulary::AxisValue;

/// Constraints a variant must satisfy to continue the current selection.
///
/// Every axis except `changed_axis` is pinned to the current variant's value
/// on it; axes the current variant has no value on are left free. The changed
/// axis is pinned to `requested_value`.
pub fn pinned_selection(
    grouping: &AxisGrouping,
    current_variant_id: VariantId,
    changed_axis: &str,
    requested_value: &str,
) -> Vec<AxisValue> {
    let current = grouping.values_for(current_variant_id);

    let mut pinned: Vec<AxisValue> = grouping
        .axis_names()
        .filter(|axis| *axis != changed_axis)
        .filter_map(|axis| {
            current
                .and_then(|values| values.value_on(axis))
                .map(|value| AxisValue::new(axis, value))
        })
        .collect();

    pinned.push(AxisValue::new(changed_axis, requested_value));
    pinned
}

/// First variant, in list order, satisfying every pinned constraint.
///
/// `None` means the exact combination does not exist in the catalog; callers
/// continue with the fallback resolver.
pub fn match_exact(
    grouping: &AxisGrouping,
    current_variant_id: VariantId,
    changed_axis: &str,
    requested_value: &str,
) -> Option<VariantId> {
    let pinned = pinned_selection(grouping, current_variant_id, changed_axis, requested_value);
    tracing::trace!(
        current = %current_variant_id,
        pinned = ?pinned,
        "searching for exact variant match"
    );

    grouping
        .variant_values()
        .iter()
        .find(|candidate| {
            pinned
                .iter()
                .all(|pin| candidate.satisfies(&pin.axis, &pin.value))
        })
        .map(|candidate| candidate.variant_id)
}

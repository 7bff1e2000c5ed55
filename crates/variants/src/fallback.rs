//! Best-effort resolution when the exact combination does not exist.

use storefront_core::VariantId;

use crate::axis::{AxisGrouping, VariantValues};

/// Outcome of the fallback search.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FallbackChoice {
    /// A variant carrying the requested value, with the number of other axes
    /// on which it agrees with the current selection.
    Candidate { variant_id: VariantId, score: usize },
    /// No variant carries the requested value; keep what the user clicked.
    Clicked(VariantId),
}

impl FallbackChoice {
    pub fn variant_id(&self) -> VariantId {
        match self {
            FallbackChoice::Candidate { variant_id, .. } => *variant_id,
            FallbackChoice::Clicked(id) => *id,
        }
    }
}

/// Pick the variant that changes the fewest other attributes.
///
/// Candidates are the variants holding `requested_value` on `changed_axis`.
/// With none, the clicked variant is returned unchanged; with one, it wins
/// outright; otherwise the highest agreement score wins and ties go to the
/// earliest variant in list order.
pub fn resolve_fallback(
    grouping: &AxisGrouping,
    current_variant_id: VariantId,
    changed_axis: &str,
    requested_value: &str,
    clicked_variant_id: VariantId,
) -> FallbackChoice {
    let current = grouping.values_for(current_variant_id);

    let mut best: Option<(VariantId, usize)> = None;
    for candidate in grouping
        .variant_values()
        .iter()
        .filter(|v| v.satisfies(changed_axis, requested_value))
    {
        let score = current
            .map(|current| agreement(grouping, current, candidate, changed_axis))
            .unwrap_or(0);

        // Strictly greater keeps the first of equally scored candidates.
        if best.is_none_or(|(_, best_score)| score > best_score) {
            best = Some((candidate.variant_id, score));
        }
    }

    match best {
        Some((variant_id, score)) => FallbackChoice::Candidate { variant_id, score },
        None => FallbackChoice::Clicked(clicked_variant_id),
    }
}

/// Number of axes other than `changed_axis` on which `candidate` holds the
/// current variant's value.
fn agreement(
    grouping: &AxisGrouping,
    current: &VariantValues,
    candidate: &VariantValues,
    changed_axis: &str,
) -> usize {
    grouping
        .axis_names()
        .filter(|axis| *axis != changed_axis)
        .filter(|axis| {
            current
                .value_on(axis)
                .is_some_and(|value| candidate.satisfies(axis, value))
        })
        .count()
}

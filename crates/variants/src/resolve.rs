//! Selection resolution: the operation the storefront calls on every click.

use serde::{Deserialize, Serialize};

use storefront_core::VariantId;

use crate::axis::{AxisGrouping, group_into_axes};
use crate::fallback::{FallbackChoice, resolve_fallback};
use crate::matcher::match_exact;
use crate::variant::ProductVariant;

/// How a resolution was reached.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResolutionStrategy {
    /// The current variant already holds the requested value.
    Unchanged,
    /// A variant matched the requested value and every pinned choice.
    Exact,
    /// Closest candidate on the changed axis; `score` counts preserved axes.
    Fallback { score: usize },
    /// Nothing holds the requested value; the clicked variant was kept.
    Clicked,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub variant_id: VariantId,
    pub strategy: ResolutionStrategy,
}

/// Resolve a single-axis change against a product's variant list.
///
/// Groups the list on every call. Callers that handle many clicks for the
/// same product should group once and use [`resolve_with`].
pub fn resolve_selection(
    variants: &[ProductVariant],
    current_variant_id: VariantId,
    changed_axis: &str,
    requested_value: &str,
    clicked_variant_id: VariantId,
) -> VariantId {
    let grouping = group_into_axes(variants);
    resolve_with(
        &grouping,
        current_variant_id,
        changed_axis,
        requested_value,
        clicked_variant_id,
    )
    .variant_id
}

/// Resolve a single-axis change using a precomputed grouping.
///
/// Total: every input produces a variant id, at worst `clicked_variant_id`.
pub fn resolve_with(
    grouping: &AxisGrouping,
    current_variant_id: VariantId,
    changed_axis: &str,
    requested_value: &str,
    clicked_variant_id: VariantId,
) -> Resolution {
    let already_selected = grouping
        .values_for(current_variant_id)
        .is_some_and(|current| current.satisfies(changed_axis, requested_value));

    let resolution = if already_selected {
        Resolution {
            variant_id: current_variant_id,
            strategy: ResolutionStrategy::Unchanged,
        }
    } else if let Some(variant_id) =
        match_exact(grouping, current_variant_id, changed_axis, requested_value)
    {
        Resolution {
            variant_id,
            strategy: ResolutionStrategy::Exact,
        }
    } else {
        match resolve_fallback(
            grouping,
            current_variant_id,
            changed_axis,
            requested_value,
            clicked_variant_id,
        ) {
            FallbackChoice::Candidate { variant_id, score } => Resolution {
                variant_id,
                strategy: ResolutionStrategy::Fallback { score },
            },
            FallbackChoice::Clicked(variant_id) => Resolution {
                variant_id,
                strategy: ResolutionStrategy::Clicked,
            },
        }
    };

    tracing::debug!(
        current = %current_variant_id,
        changed_axis,
        requested_value,
        resolved = %resolution.variant_id,
        strategy = ?resolution.strategy,
        "resolved variant selection"
    );

    resolution
}

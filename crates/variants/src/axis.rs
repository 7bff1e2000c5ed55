//! Axis grouping.
//!
//! Infers independent option axes (Color, Connection, ...) from the SKU codes
//! of a product's variants. Axis membership is a pure function of SKU content;
//! no per-product configuration is consulted.

use serde::{Deserialize, Serialize};

use storefront_core::{VariantId, push_distinct};

use crate::tokenizer::{last_segment, tokenize};
use crate::variant::ProductVariant;
use crate::vocabulary::{AxisValue, recognize};

/// One selectable value on an axis, with the variant that first produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisEntry {
    pub value: String,
    pub variant_id: VariantId,
}

/// A named option dimension and its distinct values, in first-seen order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionAxis {
    pub name: String,
    pub entries: Vec<AxisEntry>,
}

impl OptionAxis {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
        }
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.value.as_str())
    }

    pub fn entry(&self, value: &str) -> Option<&AxisEntry> {
        self.entries.iter().find(|e| e.value == value)
    }

    pub fn contains(&self, value: &str) -> bool {
        self.entry(value).is_some()
    }
}

/// Axis values derived from one variant's SKU.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantValues {
    pub variant_id: VariantId,
    pub values: Vec<AxisValue>,
}

impl VariantValues {
    /// The variant's value on `axis`: the first one in token order.
    pub fn value_on(&self, axis: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|v| v.axis == axis)
            .map(|v| v.value.as_str())
    }

    /// Whether any of the variant's values on `axis` equals `value`.
    pub fn satisfies(&self, axis: &str, value: &str) -> bool {
        self.values.iter().any(|v| v.axis == axis && v.value == value)
    }
}

/// Result of grouping a variant list into option axes.
///
/// Keeps the per-variant derived values alongside the axes, in list order, so
/// matching can scan variants without re-tokenizing every SKU on each click.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisGrouping {
    axes: Vec<OptionAxis>,
    variants: Vec<VariantValues>,
}

impl AxisGrouping {
    /// Axes in order of first appearance across the variant list.
    pub fn axes(&self) -> &[OptionAxis] {
        &self.axes
    }

    pub fn axis(&self, name: &str) -> Option<&OptionAxis> {
        self.axes.iter().find(|a| a.name == name)
    }

    pub fn axis_names(&self) -> impl Iterator<Item = &str> {
        self.axes.iter().map(|a| a.name.as_str())
    }

    /// Derived values for every variant, in original list order.
    pub fn variant_values(&self) -> &[VariantValues] {
        &self.variants
    }

    pub fn values_for(&self, variant_id: VariantId) -> Option<&VariantValues> {
        self.variants.iter().find(|v| v.variant_id == variant_id)
    }

    pub fn value_of(&self, variant_id: VariantId, axis: &str) -> Option<&str> {
        self.values_for(variant_id).and_then(|v| v.value_on(axis))
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }
}

/// Derive a SKU's axis values.
///
/// Recognized tokens map through the vocabulary in token order, with repeated
/// values dropped. A SKU with no recognized token yields exactly one value on
/// the generic axis: its last segment, verbatim.
pub fn derive_axis_values(sku_code: &str) -> Vec<AxisValue> {
    let mut values: Vec<AxisValue> = Vec::new();
    for token in tokenize(sku_code) {
        for value in recognize(token) {
            push_distinct(&mut values, value);
        }
    }

    if values.is_empty() {
        values.push(AxisValue::generic(last_segment(sku_code)));
    }
    values
}

/// Partition a product's variants into option axes.
pub fn group_into_axes(variants: &[ProductVariant]) -> AxisGrouping {
    let mut grouping = AxisGrouping::default();

    for variant in variants {
        let values = derive_axis_values(&variant.sku_code);

        for value in &values {
            let idx = match grouping.axes.iter().position(|a| a.name == value.axis) {
                Some(idx) => idx,
                None => {
                    grouping.axes.push(OptionAxis::new(value.axis.clone()));
                    grouping.axes.len() - 1
                }
            };

            // One displayed entry per value; disambiguation is the matcher's job.
            let axis = &mut grouping.axes[idx];
            if !axis.contains(&value.value) {
                axis.entries.push(AxisEntry {
                    value: value.value.clone(),
                    variant_id: variant.id,
                });
            }
        }

        grouping.variants.push(VariantValues {
            variant_id: variant.id,
            values,
        });
    }

    grouping
}

use serde::{Deserialize, Serialize};

use storefront_core::{Entity, VariantId};

/// A purchasable, SKU-coded variant of a product.
///
/// Immutable once fetched from the catalog. The full set for a product is an
/// ordered list, and list order is the tie-break order for all matching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductVariant {
    pub id: VariantId,
    pub sku_code: String,
    /// Stored price in the smallest currency unit (e.g. cents).
    pub price: u64,
    pub in_stock: bool,
}

impl ProductVariant {
    pub fn new(id: VariantId, sku_code: impl Into<String>, price: u64, in_stock: bool) -> Self {
        Self {
            id,
            sku_code: sku_code.into(),
            price,
            in_stock,
        }
    }
}

impl Entity for ProductVariant {
    type Id = VariantId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Look up a variant by id, preserving list semantics (first occurrence wins).
pub fn find_variant(variants: &[ProductVariant], id: VariantId) -> Option<&ProductVariant> {
    variants.iter().find(|v| *Entity::id(*v) == id)
}

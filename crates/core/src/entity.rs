//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Catalog variants are entities: two variants with the same SKU are still
/// distinct purchasable items if their identifiers differ.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}

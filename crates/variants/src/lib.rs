//! Variant resolution for SKU-coded product variants.
//!
//! This crate infers option axes (Color, Connection, ...) from SKU content and
//! resolves a shopper's single-axis change to a concrete variant, implemented
//! purely as deterministic domain logic (no IO, no HTTP, no storage).
//!
//! Pipeline: [`tokenizer`] → [`axis`] grouping → [`matcher`] → [`fallback`],
//! wrapped by [`resolve::resolve_selection`]. [`selection`] models the
//! per-product-view selection state as an aggregate.

pub mod axis;
pub mod config;
pub mod fallback;
pub mod matcher;
pub mod resolve;
pub mod selection;
pub mod tokenizer;
pub mod variant;
pub mod vocabulary;

pub use axis::{
    AxisEntry, AxisGrouping, OptionAxis, VariantValues, derive_axis_values, group_into_axes,
};
pub use config::{ConfigError, InitialSelection, ResolverConfig};
pub use fallback::{FallbackChoice, resolve_fallback};
pub use matcher::{match_exact, pinned_selection};
pub use resolve::{Resolution, ResolutionStrategy, resolve_selection, resolve_with};
pub use selection::{
    LoadVariants, OptionSelected, ProductSelection, SelectOption, SelectionCommand,
    SelectionEvent, VariantsLoaded,
};
pub use tokenizer::{RawToken, SKU_DELIMITER, tokenize};
pub use variant::{ProductVariant, find_variant};
pub use vocabulary::{AxisValue, AxisVocabulary, COLOR_AXIS, CONNECTION_AXIS, GENERIC_AXIS};

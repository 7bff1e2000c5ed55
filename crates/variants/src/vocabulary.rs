//! Canonical token vocabulary.
//!
//! The single lookup table mapping raw SKU tokens to axis values. Both the
//! grouper and the selection state derive values through it, so the option a
//! shopper sees highlighted and the option the matcher pins can never disagree.

use serde::{Deserialize, Serialize};

use storefront_core::ValueObject;

use crate::tokenizer::RawToken;

pub const COLOR_AXIS: &str = "Color";
pub const CONNECTION_AXIS: &str = "Connection";
/// Catch-all axis for variants whose SKU matches no vocabulary.
pub const GENERIC_AXIS: &str = "Options";

/// Token vocabulary for one option axis.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct AxisVocabulary {
    pub axis: &'static str,
    /// `(key, canonical value)` pairs; keys are lowercase.
    pub entries: &'static [(&'static str, &'static str)],
}

pub const COLOR_VOCABULARY: AxisVocabulary = AxisVocabulary {
    axis: COLOR_AXIS,
    entries: &[
        ("sil", "Silver"),
        ("blu", "Blue"),
        ("red", "Red"),
        ("whi", "White"),
        ("bla", "Black"),
    ],
};

pub const CONNECTION_VOCABULARY: AxisVocabulary = AxisVocabulary {
    axis: CONNECTION_AXIS,
    entries: &[("wif", "WiFi"), ("wir", "Wired")],
};

/// Vocabularies in lookup priority order.
pub const VOCABULARIES: &[AxisVocabulary] = &[COLOR_VOCABULARY, CONNECTION_VOCABULARY];

impl AxisVocabulary {
    /// Canonical value for a token, if the token starts with one of the keys
    /// (ASCII case-insensitive).
    pub fn lookup(&self, token: &str) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(key, _)| has_prefix_ignore_case(token, key))
            .map(|(_, value)| *value)
    }
}

fn has_prefix_ignore_case(token: &str, key: &str) -> bool {
    // `get` returns None when the cut would split a multi-byte character.
    token
        .get(..key.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(key))
}

/// A canonical meaning of a SKU token, e.g. `Color = "Silver"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AxisValue {
    pub axis: String,
    pub value: String,
}

impl AxisValue {
    pub fn new(axis: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            axis: axis.into(),
            value: value.into(),
        }
    }

    /// Verbatim fallback value on the generic axis.
    pub fn generic(value: impl Into<String>) -> Self {
        Self::new(GENERIC_AXIS, value)
    }

    pub fn is_generic(&self) -> bool {
        self.axis == GENERIC_AXIS
    }
}

impl ValueObject for AxisValue {}

impl core::fmt::Display for AxisValue {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}={}", self.axis, self.value)
    }
}

/// Every axis value a single token maps to, in vocabulary priority order.
///
/// Each vocabulary contributes to a different axis, so a token recognized by
/// several vocabularies yields one value per axis.
pub fn recognize(token: RawToken<'_>) -> Vec<AxisValue> {
    VOCABULARIES
        .iter()
        .filter_map(|vocab| {
            vocab
                .lookup(token.as_str())
                .map(|value| AxisValue::new(vocab.axis, value))
        })
        .collect()
}

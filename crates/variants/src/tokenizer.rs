//! SKU tokenizer.
//!
//! Splits a SKU code into its hyphen-delimited segments. Case is preserved;
//! folding happens when tokens are matched against the vocabulary.

/// Delimiter used by the catalog's SKU convention.
pub const SKU_DELIMITER: char = '-';

/// One delimiter-separated segment of a SKU code, verbatim.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct RawToken<'a>(&'a str);

impl<'a> RawToken<'a> {
    pub fn as_str(&self) -> &'a str {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl core::fmt::Display for RawToken<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.0)
    }
}

/// Split a SKU into ordered tokens.
///
/// Never fails: a SKU without a delimiter (including the empty string) yields a
/// single token equal to the whole input.
pub fn tokenize(sku_code: &str) -> Vec<RawToken<'_>> {
    sku_code.split(SKU_DELIMITER).map(RawToken).collect()
}

/// The last segment of a SKU, or the whole SKU when it has no delimiter.
pub fn last_segment(sku_code: &str) -> &str {
    sku_code.rsplit(SKU_DELIMITER).next().unwrap_or(sku_code)
}

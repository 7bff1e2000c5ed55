//! Resolver configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use storefront_core::VariantId;

use crate::variant::ProductVariant;

/// Environment variable selecting the initial variant policy.
pub const INITIAL_SELECTION_ENV: &str = "STOREFRONT_INITIAL_SELECTION";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?} (expected one of: {expected})")]
    InvalidValue {
        key: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// Which variant a freshly loaded product starts on.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InitialSelection {
    /// The first variant in list order.
    FirstListed,
    /// The first in-stock variant, else the first variant in list order.
    #[default]
    PreferInStock,
}

impl InitialSelection {
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "first" | "first_listed" => Ok(InitialSelection::FirstListed),
            "in_stock" | "prefer_in_stock" => Ok(InitialSelection::PreferInStock),
            _ => Err(ConfigError::InvalidValue {
                key: INITIAL_SELECTION_ENV,
                value: raw.to_string(),
                expected: "first, in_stock",
            }),
        }
    }

    /// Pick the starting variant; `None` only for an empty list.
    pub fn pick(self, variants: &[ProductVariant]) -> Option<VariantId> {
        let first = variants.first().map(|v| v.id);
        match self {
            InitialSelection::FirstListed => first,
            InitialSelection::PreferInStock => {
                variants.iter().find(|v| v.in_stock).map(|v| v.id).or(first)
            }
        }
    }
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverConfig {
    pub initial_selection: InitialSelection,
}

impl ResolverConfig {
    /// Load configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup; unset keys keep
    /// their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(raw) = lookup(INITIAL_SELECTION_ENV) {
            config.initial_selection = InitialSelection::parse(&raw)?;
        }
        Ok(config)
    }
}

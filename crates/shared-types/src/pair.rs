//! # Asset Pair
//!
//! The symbolic `(Base, Quote)` identifier every price is keyed by.

use crate::errors::TypeError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Maximum length of a single asset symbol in bytes.
pub const MAX_SYMBOL_LEN: usize = 32;

/// Ordered pair identifying a tracked price, e.g. `BTC/USD`.
///
/// Ordering is lexical on `base`, then `quote`. Every ordered container of
/// pairs in the workspace relies on this ordering for determinism.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AssetPair {
    #[serde(alias = "Base")]
    pub base: String,
    #[serde(alias = "Quote")]
    pub quote: String,
}

impl AssetPair {
    /// Create a pair, upper-casing and validating both symbols.
    pub fn new(base: impl AsRef<str>, quote: impl AsRef<str>) -> Result<Self, TypeError> {
        let pair = Self {
            base: base.as_ref().to_ascii_uppercase(),
            quote: quote.as_ref().to_ascii_uppercase(),
        };
        pair.validate()?;
        Ok(pair)
    }

    /// Check both symbols are non-empty, bounded and upper-case alphanumeric.
    ///
    /// Pairs arriving from the wire are deserialized without going through
    /// [`AssetPair::new`], so decoders call this explicitly.
    pub fn validate(&self) -> Result<(), TypeError> {
        validate_symbol(&self.base)?;
        validate_symbol(&self.quote)
    }
}

fn validate_symbol(symbol: &str) -> Result<(), TypeError> {
    let valid = !symbol.is_empty()
        && symbol.len() <= MAX_SYMBOL_LEN
        && symbol
            .bytes()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit() || b == b'_' || b == b'-');
    if valid {
        Ok(())
    } else {
        Err(TypeError::InvalidSymbol(symbol.to_string()))
    }
}

impl fmt::Display for AssetPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.quote)
    }
}

impl FromStr for AssetPair {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((base, quote)) = s.split_once('/') else {
            return Err(TypeError::InvalidPair(s.to_string()));
        };
        Self::new(base.trim(), quote.trim()).map_err(|_| TypeError::InvalidPair(s.to_string()))
    }
}

//! # Asset Configuration
//!
//! Declarative per-pair configuration supplied by governance. The oracle
//! core only ever reads these records.

use crate::pair::AssetPair;
use serde::{Deserialize, Serialize};

/// One tracked asset pair and the venues it is priced from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetSpec {
    pub pair: AssetPair,
    /// Fixed-point scale of the pair's price.
    pub decimals: u8,
    /// Venues that must produce a price before this validator reports one.
    pub min_provider_count: u32,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Free-form governance metadata, never interpreted.
    #[serde(default)]
    pub metadata: String,
    #[serde(default, alias = "provider_configs")]
    pub venues: Vec<VenueBinding>,
}

fn default_enabled() -> bool {
    true
}

/// A single venue a pair is quoted on.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VenueBinding {
    pub venue_name: String,
    /// Off-chain ticker on the venue, e.g. `BTC-USDT`.
    pub venue_symbol: String,
    /// Multiply the venue quote by this pair's current price.
    #[serde(default)]
    pub normalize_by_pair: Option<AssetPair>,
    /// The venue quotes `Quote/Base`; take the reciprocal.
    #[serde(default)]
    pub invert: bool,
}

impl VenueBinding {
    pub fn new(venue_name: impl Into<String>, venue_symbol: impl Into<String>) -> Self {
        Self {
            venue_name: venue_name.into(),
            venue_symbol: venue_symbol.into(),
            normalize_by_pair: None,
            invert: false,
        }
    }

    pub fn normalized_by(mut self, pair: AssetPair) -> Self {
        self.normalize_by_pair = Some(pair);
        self
    }

    pub fn inverted(mut self) -> Self {
        self.invert = true;
        self
    }
}

impl AssetSpec {
    pub fn new(pair: AssetPair, decimals: u8, min_provider_count: u32) -> Self {
        Self {
            pair,
            decimals,
            min_provider_count,
            enabled: true,
            metadata: String::new(),
            venues: Vec::new(),
        }
    }

    pub fn with_venue(mut self, venue: VenueBinding) -> Self {
        self.venues.push(venue);
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Pairs this spec normalizes by, in venue order (may repeat).
    pub fn normalization_dependencies(&self) -> impl Iterator<Item = &AssetPair> {
        self.venues
            .iter()
            .filter_map(|venue| venue.normalize_by_pair.as_ref())
    }
}

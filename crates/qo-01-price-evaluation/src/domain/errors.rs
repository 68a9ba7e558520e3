//! Error types for Price Evaluation
//!
//! Only configuration problems are errors. Missing or unusable venue data is
//! reported through [`Omission`](super::entities::Omission) instead.

use thiserror::Error;

/// Asset configuration rejected at load time
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Configuration document could not be parsed
    #[error("Failed to parse asset configuration: {0}")]
    Parse(String),

    /// Pair symbols are malformed
    #[error("Invalid asset pair {pair}: {reason}")]
    InvalidPair { pair: String, reason: String },

    /// The same pair is configured twice
    #[error("Duplicate asset pair: {0}")]
    DuplicatePair(String),

    /// Decimals exceed the supported fixed-point scale
    #[error("Pair {pair}: decimals {decimals} exceed maximum {max}")]
    InvalidDecimals { pair: String, decimals: u8, max: u8 },

    /// A quorum of zero venues is meaningless
    #[error("Pair {0}: min_provider_count must be at least 1")]
    ZeroMinProviders(String),

    /// Fewer venues are configured than the quorum requires
    #[error("Pair {pair}: min_provider_count {required} exceeds {configured} configured venues")]
    UnreachableQuorum {
        pair: String,
        required: u32,
        configured: usize,
    },

    /// A venue binding has an empty name or symbol
    #[error("Pair {pair}: invalid venue binding {venue:?}")]
    InvalidVenue { pair: String, venue: String },

    /// A venue normalizes by a pair that is not configured
    #[error("Pair {pair}: normalize_by_pair {missing} is not a configured pair")]
    UnknownNormalizationPair { pair: String, missing: String },

    /// The normalization graph contains a cycle
    #[error("Normalization cycle detected: {path}")]
    NormalizationCycle { path: String },
}

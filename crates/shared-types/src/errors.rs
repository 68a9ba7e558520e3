//! # Error Types
//!
//! Errors raised while constructing shared entities.

use thiserror::Error;

/// Errors that can occur when building or parsing shared types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeError {
    /// Asset symbol is empty, too long, or contains illegal characters.
    #[error("Invalid asset symbol: {0:?}")]
    InvalidSymbol(String),

    /// Pair string is not of the form `BASE/QUOTE`.
    #[error("Invalid asset pair: {0:?}")]
    InvalidPair(String),

    /// Decimal literal could not be parsed.
    #[error("Invalid decimal literal: {0:?}")]
    InvalidDecimal(String),

    /// Scale exceeds the supported maximum.
    #[error("Scale {scale} exceeds maximum {max}")]
    ScaleTooLarge { scale: u32, max: u8 },

    /// Value does not fit the target integer width.
    #[error("Numeric overflow")]
    Overflow,
}

//! Error types for the Extended Commit codec

use shared_types::ValidatorId;
use thiserror::Error;

/// Extended commit encode/decode errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtendedCommitError {
    #[error("Unsupported extended commit version: {0}")]
    UnsupportedVersion(u8),

    #[error("Too many entries: {count} (max {max})")]
    TooManyEntries { count: usize, max: usize },

    #[error("Validator {validator}: signature is {found} bytes, expected {expected}")]
    SignatureLength {
        validator: ValidatorId,
        expected: usize,
        found: usize,
    },

    #[error("Validator {0}: signature present without a vote extension")]
    UnexpectedSignature(ValidatorId),

    #[error("Extended commit of {size} bytes exceeds limit of {max}")]
    TooLarge { size: usize, max: usize },

    #[error("Duplicate validator {0}")]
    DuplicateValidator(ValidatorId),

    #[error("Entries not in canonical order at index {index}")]
    NonCanonicalOrder { index: usize },

    #[error("Malformed extended commit: {0}")]
    Malformed(String),

    #[error("Serialization failed: {0}")]
    Serialization(String),
}

/// Result type for the Extended Commit codec
pub type ExtendedCommitResult<T> = Result<T, ExtendedCommitError>;

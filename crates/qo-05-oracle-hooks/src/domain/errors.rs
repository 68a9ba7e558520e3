//! Error types for the Oracle Hooks

use qo_01_price_evaluation::ConfigError;
use qo_03_extended_commit::ExtendedCommitError;
use qo_04_price_aggregation::AggregationError;
use thiserror::Error;

/// Price store errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PriceStoreError {
    #[error("Prices already written at height {height} (last write at {last})")]
    HeightAlreadyWritten { height: u64, last: u64 },
}

/// Signature verification errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SignatureError {
    #[error("Invalid public key")]
    InvalidPublicKey,

    #[error("Invalid signature length: {0}")]
    InvalidLength(usize),

    #[error("Signature verification failed")]
    VerificationFailed,
}

/// Oracle hook errors.
///
/// Only assemble-proposal and finalize-block surface errors; the other hooks
/// answer accept/reject.
#[derive(Debug, Error)]
pub enum OracleError {
    #[error("Asset configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Aggregation configuration error: {0}")]
    Aggregation(#[from] AggregationError),

    #[error("Extended commit error: {0}")]
    ExtendedCommit(#[from] ExtendedCommitError),

    #[error("Price store error: {0}")]
    PriceStore(#[from] PriceStoreError),

    #[error("Block at height {height} has no oracle transaction")]
    MissingOracleTx { height: u64 },

    #[error("Malformed oracle transaction: {0}")]
    MalformedOracleTx(String),

    #[error("Oracle transaction of {size} bytes exceeds the block limit of {max}")]
    OracleTxTooLarge { size: usize, max: usize },
}

/// Result type for the Oracle Hooks
pub type OracleResult<T> = Result<T, OracleError>;

//! Error types for the Vote Extension codec

use std::io;
use thiserror::Error;

/// Errors during compression/decompression
#[derive(Debug, Error)]
pub enum CompressionError {
    #[error("Compression failed: {0}")]
    CompressFailed(#[source] io::Error),

    #[error("Decompression failed: {0}")]
    DecompressFailed(#[source] io::Error),

    #[error("Decompressed size exceeds limit of {limit} bytes")]
    SizeLimitExceeded { limit: usize },
}

/// Vote extension encode/decode errors.
///
/// Every decode error means the same thing to callers: the extension is
/// invalid and its sender is treated as a non-voter.
#[derive(Debug, Error)]
pub enum VoteExtensionError {
    #[error("Frame too short: {len} bytes")]
    FrameTooShort { len: usize },

    #[error("Frame too large: {len} bytes (max {max})")]
    FrameTooLarge { len: usize, max: usize },

    #[error("Unsupported frame version: {0}")]
    UnsupportedVersion(u8),

    #[error("Compressor mismatch: expected {expected}, found {found}")]
    CompressorMismatch { expected: u8, found: u8 },

    #[error(transparent)]
    Compression(#[from] CompressionError),

    #[error("Checksum mismatch: frame {expected:08x}, payload {computed:08x}")]
    ChecksumMismatch { expected: u32, computed: u32 },

    #[error("Malformed payload: {0}")]
    Malformed(String),

    #[error("Invalid asset pair in payload: {0}")]
    InvalidPair(String),

    #[error("Entries not in strictly ascending pair order at index {index}")]
    NonCanonicalOrder { index: usize },

    #[error("Serialization failed: {0}")]
    Serialization(String),
}

/// Result type for the Vote Extension codec
pub type VoteExtensionResult<T> = Result<T, VoteExtensionError>;

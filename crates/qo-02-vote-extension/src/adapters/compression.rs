//! # Extension Compressors
//!
//! - `ZstdCompressor`: zstd bulk compression (feature `compression`)
//! - `NoOpCompressor`: identity, for tests and debugging
//!
//! Decompression is always bounded so a hostile frame cannot inflate past
//! the configured payload ceiling.

use crate::domain::errors::CompressionError;
use crate::ports::outbound::ExtensionCompressor;

/// Frame id of [`NoOpCompressor`]
pub const NOOP_COMPRESSOR_ID: u8 = 0;

/// Frame id of [`ZstdCompressor`]
pub const ZSTD_COMPRESSOR_ID: u8 = 1;

// =============================================================================
// ZSTD COMPRESSOR
// =============================================================================

/// Zstd-based compressor
#[cfg(feature = "compression")]
#[derive(Clone, Debug)]
pub struct ZstdCompressor {
    level: i32,
}

#[cfg(feature = "compression")]
impl ZstdCompressor {
    pub fn new(level: i32) -> Self {
        Self { level }
    }
}

#[cfg(feature = "compression")]
impl Default for ZstdCompressor {
    fn default() -> Self {
        Self::new(3)
    }
}

#[cfg(feature = "compression")]
impl ExtensionCompressor for ZstdCompressor {
    fn id(&self) -> u8 {
        ZSTD_COMPRESSOR_ID
    }

    fn compress(&self, data: &[u8]) -> Result<Vec<u8>, CompressionError> {
        zstd::bulk::compress(data, self.level).map_err(CompressionError::CompressFailed)
    }

    fn decompress(&self, data: &[u8], max_size: usize) -> Result<Vec<u8>, CompressionError> {
        // Fails rather than grow past `max_size`
        zstd::bulk::decompress(data, max_size).map_err(CompressionError::DecompressFailed)
    }
}

// =============================================================================
// NO-OP COMPRESSOR
// =============================================================================

/// No-op compressor that returns data unchanged
#[derive(Clone, Copy, Debug, Default)]
pub struct NoOpCompressor;

impl ExtensionCompressor for NoOpCompressor {
    fn id(&self) -> u8 {
        NOOP_COMPRESSOR_ID
    }

    fn compress(&self, data: &[u8]) -> Result<Vec<u8>, CompressionError> {
        Ok(data.to_vec())
    }

    fn decompress(&self, data: &[u8], max_size: usize) -> Result<Vec<u8>, CompressionError> {
        if data.len() > max_size {
            return Err(CompressionError::SizeLimitExceeded { limit: max_size });
        }
        Ok(data.to_vec())
    }
}

//! Outbound ports (driven side)

use crate::domain::errors::CompressionError;

/// Compression stage of the vote-extension pipeline.
///
/// Selected once per process. Every validator on a network must use the
/// same implementation: the compressor id is written into each frame and a
/// mismatch is rejected on decode.
pub trait ExtensionCompressor: Send + Sync {
    /// Identifier written into the frame header
    fn id(&self) -> u8;

    /// Compress data
    fn compress(&self, data: &[u8]) -> Result<Vec<u8>, CompressionError>;

    /// Decompress data, failing if the output would exceed `max_size` bytes
    fn decompress(&self, data: &[u8], max_size: usize) -> Result<Vec<u8>, CompressionError>;
}

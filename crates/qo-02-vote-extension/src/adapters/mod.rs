//! Adapters for the Vote Extension codec

pub mod compression;

#[cfg(feature = "compression")]
pub use compression::ZstdCompressor;
pub use compression::{NoOpCompressor, NOOP_COMPRESSOR_ID, ZSTD_COMPRESSOR_ID};

//! # QO-02: Vote Extension Codec
//!
//! Serializes a validator's [`LocalPriceSet`](shared_types::LocalPriceSet)
//! into the bytes attached to its precommit, and back.
//!
//! ## Architecture
//!
//! - **Domain**: canonical payload, frame constants, errors
//! - **Ports**: Outbound `ExtensionCompressor`
//! - **Adapters**: `ZstdCompressor`, `NoOpCompressor`
//! - **Codec**: `VoteExtensionCodec` (framing, truncation, validation)
//!
//! ## Guarantees
//!
//! - `decode(encode(s)) == s` for every set that fits the size ceiling
//! - Oversized sets are truncated deterministically by pair priority
//! - Corrupt, truncated or foreign-compressor frames are rejected, never
//!   partially decoded

pub mod adapters;
pub mod codec;
pub mod config;
pub mod domain;
pub mod ports;

#[cfg(feature = "compression")]
pub use adapters::ZstdCompressor;
pub use adapters::NoOpCompressor;
pub use codec::{EncodedExtension, VoteExtensionCodec};
pub use config::VoteExtensionConfig;
pub use domain::errors::{CompressionError, VoteExtensionError, VoteExtensionResult};
pub use ports::outbound::ExtensionCompressor;

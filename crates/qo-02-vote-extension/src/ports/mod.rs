//! Ports for the Vote Extension codec

pub mod outbound;

pub use outbound::ExtensionCompressor;

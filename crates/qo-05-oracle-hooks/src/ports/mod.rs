//! Ports for the Oracle Hooks

pub mod outbound;

pub use outbound::{ExtensionSignatureVerifier, PriceStore};

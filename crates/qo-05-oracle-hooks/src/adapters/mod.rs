//! Adapters for the Oracle Hooks
//!
//! - `price_store`: in-memory `PriceStore`
//! - `signature`: ed25519 `ExtensionSignatureVerifier` and signer

pub mod price_store;
pub mod signature;

pub use price_store::InMemoryPriceStore;
pub use signature::{Ed25519Signer, Ed25519Verifier};

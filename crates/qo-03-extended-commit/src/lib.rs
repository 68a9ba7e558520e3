//! # QO-03: Extended Commit Codec
//!
//! Serializes the per-block collection of validator vote extensions that a
//! proposer embeds in its proposal, and validates its structure on decode.
//!
//! ## Canonical Order
//!
//! Entries are ordered by voting power descending, ties broken by validator
//! identity. The order is protocol: encode refuses any other order and decode
//! rejects it.

pub mod codec;
pub mod config;
pub mod domain;

pub use codec::{ExtendedCommitCodec, COMMIT_VERSION};
pub use config::ExtendedCommitConfig;
pub use domain::errors::{ExtendedCommitError, ExtendedCommitResult};
pub use domain::ordering::{canonical_cmp, sort_canonical};

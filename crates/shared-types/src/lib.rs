//! # Shared Types Crate
//!
//! This crate contains the oracle entities passed between subsystems.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All cross-subsystem types are defined here.
//! - **No Floating Point**: Every price that leaves a process is a [`Price`],
//!   a fixed-point `U256` magnitude scaled by the pair's decimals.
//! - **Deterministic Iteration**: Price sets are ordered maps keyed by
//!   [`AssetPair`], so iteration always follows pair lexical order.

pub mod asset;
pub mod decimal;
pub mod entities;
pub mod errors;
pub mod pair;
pub mod price;
pub mod quote;
pub mod validator;

pub use asset::{AssetSpec, VenueBinding};
pub use decimal::FixedDecimal;
pub use entities::{CanonicalPriceSet, ExtendedCommitEntry, LocalPriceSet};
pub use errors::TypeError;
pub use pair::AssetPair;
pub use price::{div_round_half_even, pow10, Price, MAX_DECIMALS};
pub use quote::RawQuote;
pub use validator::ValidatorId;

// Re-export the wide integers used by fixed-point arithmetic
pub use primitive_types::{U256, U512};

//! # QO-04: Price Aggregation Subsystem
//!
//! Computes the block's [`CanonicalPriceSet`](shared_types::CanonicalPriceSet)
//! from every validator's decoded vote extension.
//!
//! ## Rules
//!
//! - A pair is included only if validators reporting it hold at least the
//!   configured fraction (default 2/3) of total voting power
//! - The canonical price is the stake-weighted median; an exact half-power
//!   boundary between two prices yields their half-to-even midpoint
//! - Validators whose extension failed to decode count toward total power
//!   but report nothing

pub mod algorithms;
pub mod config;
pub mod domain;
pub mod service;

pub use algorithms::{meets_threshold, weighted_median};
pub use config::AggregationConfig;
pub use domain::{AggregationError, ValidatorReport};
pub use service::StakeWeightedAggregator;

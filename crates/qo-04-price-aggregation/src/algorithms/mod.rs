//! Algorithms module for Price Aggregation
//!
//! Contains:
//! - Supermajority threshold check
//! - Stake-weighted median

pub mod threshold;
pub mod weighted_median;

pub use threshold::meets_threshold;
pub use weighted_median::weighted_median;

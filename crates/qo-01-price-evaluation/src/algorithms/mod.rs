//! Algorithms module for Price Evaluation
//!
//! Contains:
//! - Kahn's topological sort of the normalization graph
//! - Exact conversion-path arithmetic
//! - Median of venue prices

pub mod conversion;
pub mod kahns;
pub mod median;

pub use conversion::{venue_price, Normalizer};
pub use kahns::kahns_topological_sort;
pub use median::median;

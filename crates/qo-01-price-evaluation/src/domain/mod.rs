//! Domain module for Price Evaluation
//!
//! Contains the validated asset registry, the normalization graph, the
//! evaluation report and configuration errors.

pub mod entities;
pub mod errors;
pub mod registry;

pub use entities::*;
pub use errors::*;
pub use registry::AssetRegistry;

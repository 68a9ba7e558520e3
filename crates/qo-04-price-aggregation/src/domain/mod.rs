//! Domain module for Price Aggregation

pub mod entities;
pub mod errors;

pub use entities::ValidatorReport;
pub use errors::AggregationError;

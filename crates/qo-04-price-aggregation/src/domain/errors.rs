//! Error types for Price Aggregation

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AggregationError {
    #[error("Invalid threshold {numerator}/{denominator}: must be in (0, 1]")]
    InvalidThreshold { numerator: u64, denominator: u64 },
}

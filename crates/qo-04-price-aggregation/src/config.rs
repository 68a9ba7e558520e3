//! Configuration for Price Aggregation

use crate::domain::errors::AggregationError;
use serde::{Deserialize, Serialize};

/// Aggregation configuration.
///
/// A pair is written only if the voting power reporting it is at least
/// `threshold_numerator / threshold_denominator` of the total voting power
/// in the extended commit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregationConfig {
    pub threshold_numerator: u64,
    pub threshold_denominator: u64,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        // Supermajority: 2/3
        Self {
            threshold_numerator: 2,
            threshold_denominator: 3,
        }
    }
}

impl AggregationConfig {
    /// Threshold must be a fraction in `(0, 1]`.
    pub fn validate(&self) -> Result<(), AggregationError> {
        if self.threshold_numerator == 0
            || self.threshold_denominator == 0
            || self.threshold_numerator > self.threshold_denominator
        {
            return Err(AggregationError::InvalidThreshold {
                numerator: self.threshold_numerator,
                denominator: self.threshold_denominator,
            });
        }
        Ok(())
    }
}

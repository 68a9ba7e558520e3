//! Configuration for Price Evaluation

use serde::{Deserialize, Serialize};

/// Evaluation configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EvaluationConfig {
    /// Quotes older than this (relative to evaluation time) are ignored
    pub max_quote_age_secs: u64,
    /// Quotes timestamped further than this in the future are ignored
    pub max_future_skew_secs: u64,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            max_quote_age_secs: 60,
            max_future_skew_secs: 5,
        }
    }
}

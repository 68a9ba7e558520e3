//! Configuration for the Oracle Hooks

use qo_01_price_evaluation::EvaluationConfig;
use qo_02_vote_extension::VoteExtensionConfig;
use qo_03_extended_commit::ExtendedCommitConfig;
use qo_04_price_aggregation::AggregationConfig;
use serde::{Deserialize, Serialize};

/// Composite oracle configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OracleConfig {
    /// Chain id mixed into vote-extension sign bytes
    pub chain_id: String,
    /// First height at which validators extend votes. `0` disables the oracle.
    pub vote_extensions_enable_height: u64,
    #[serde(default)]
    pub evaluation: EvaluationConfig,
    #[serde(default)]
    pub vote_extension: VoteExtensionConfig,
    #[serde(default)]
    pub extended_commit: ExtendedCommitConfig,
    #[serde(default)]
    pub aggregation: AggregationConfig,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            chain_id: "quantum-oracle-1".to_string(),
            vote_extensions_enable_height: 1,
            evaluation: EvaluationConfig::default(),
            vote_extension: VoteExtensionConfig::default(),
            extended_commit: ExtendedCommitConfig::default(),
            aggregation: AggregationConfig::default(),
        }
    }
}

impl OracleConfig {
    /// Whether validators extend (and verify) votes at `height`.
    pub fn extensions_enabled(&self, height: u64) -> bool {
        self.vote_extensions_enable_height > 0 && height >= self.vote_extensions_enable_height
    }

    /// Whether the proposal at `height` carries an oracle transaction.
    ///
    /// A proposal carries the extensions of the previous height's votes, so
    /// this starts one height after extensions are enabled.
    pub fn proposal_carries_prices(&self, height: u64) -> bool {
        height > 0 && self.extensions_enabled(height - 1)
    }
}

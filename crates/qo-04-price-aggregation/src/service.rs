//! Stake-Weighted Aggregator
//!
//! Folds every validator's decoded price report into one canonical price
//! per pair. The result depends only on the reports and the threshold.

use crate::algorithms::{meets_threshold, weighted_median};
use crate::config::AggregationConfig;
use crate::domain::entities::ValidatorReport;
use crate::domain::errors::AggregationError;
use shared_types::{AssetPair, CanonicalPriceSet, Price};
use std::collections::BTreeMap;
use tracing::debug;

/// Stake-Weighted Aggregator
///
/// Per pair:
/// 1. Collect each decoded validator's price, weighted by voting power
/// 2. Omit the pair if the reporting power is below the threshold of total
///    voting power
/// 3. Otherwise take the stake-weighted median
#[derive(Clone, Debug, Default)]
pub struct StakeWeightedAggregator {
    config: AggregationConfig,
}

impl StakeWeightedAggregator {
    pub fn new(config: AggregationConfig) -> Result<Self, AggregationError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &AggregationConfig {
        &self.config
    }

    /// Aggregate one block's reports into its canonical prices.
    pub fn aggregate(&self, reports: &[ValidatorReport]) -> CanonicalPriceSet {
        // Every validator counts toward total power, including non-voters
        let total_power: u128 = reports
            .iter()
            .map(|report| u128::from(report.voting_power))
            .sum();

        let mut samples: BTreeMap<&AssetPair, Vec<(Price, u64)>> = BTreeMap::new();
        for report in reports {
            let Some(prices) = &report.prices else {
                continue;
            };
            for (pair, price) in prices {
                samples
                    .entry(pair)
                    .or_default()
                    .push((*price, report.voting_power));
            }
        }

        let mut canonical = CanonicalPriceSet::new();
        for (pair, pair_samples) in samples {
            let reporting_power: u128 = pair_samples
                .iter()
                .map(|(_, power)| u128::from(*power))
                .sum();

            if !meets_threshold(
                reporting_power,
                total_power,
                self.config.threshold_numerator,
                self.config.threshold_denominator,
            ) {
                debug!(
                    pair = %pair,
                    reporting_power,
                    total_power,
                    "Reporting power below threshold, pair not updated"
                );
                continue;
            }

            if let Some(price) = weighted_median(&pair_samples) {
                canonical.insert(pair.clone(), price);
            }
        }

        debug!(
            validators = reports.len(),
            pairs = canonical.len(),
            "Aggregation complete"
        );
        canonical
    }
}

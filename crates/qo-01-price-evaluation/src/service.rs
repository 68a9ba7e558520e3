//! Price Evaluation Service
//!
//! Builds the validator's local price set from one quote snapshot.

use crate::adapters::QuoteSnapshot;
use crate::algorithms::{median, venue_price, Normalizer};
use crate::config::EvaluationConfig;
use crate::domain::entities::{EvaluationReport, Omission};
use crate::domain::registry::AssetRegistry;
use crate::ports::outbound::QuoteSource;
use shared_types::{AssetPair, AssetSpec, LocalPriceSet, Price, RawQuote, VenueBinding};
use std::collections::BTreeMap;
use tracing::{debug, trace};

/// Price Evaluator
///
/// Orchestrates one evaluation pass:
/// 1. Walk pairs in topological order
/// 2. Compute each usable venue's price (freshness, inversion, normalization)
/// 3. Enforce the pair's provider quorum
/// 4. Take the median
/// 5. Report enabled pairs only
#[derive(Clone, Debug, Default)]
pub struct PriceEvaluator {
    config: EvaluationConfig,
}

impl PriceEvaluator {
    /// Create a new evaluator with default config
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new evaluator with custom config
    pub fn with_config(config: EvaluationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EvaluationConfig {
        &self.config
    }

    /// Evaluate against the current contents of `source`.
    pub fn evaluate_source(
        &self,
        registry: &AssetRegistry,
        source: &dyn QuoteSource,
        now: u64,
    ) -> EvaluationReport {
        self.evaluate(registry, &source.snapshot(), now)
    }

    /// Evaluate every pair in `registry` against `quotes` at time `now`
    /// (unix seconds, normally the block time).
    pub fn evaluate(
        &self,
        registry: &AssetRegistry,
        quotes: &QuoteSnapshot,
        now: u64,
    ) -> EvaluationReport {
        // Prices of every pair with quorum, enabled or not; normalizers read from here
        let mut resolved: BTreeMap<AssetPair, Price> = BTreeMap::new();
        let mut omitted: BTreeMap<AssetPair, Omission> = BTreeMap::new();

        for pair in registry.evaluation_order() {
            let Some(spec) = registry.get(pair) else {
                continue;
            };

            let venue_prices: Vec<Price> = spec
                .venues
                .iter()
                .filter_map(|venue| self.venue_price(registry, spec, venue, quotes, &resolved, now))
                .collect();

            if venue_prices.len() < spec.min_provider_count as usize {
                debug!(
                    pair = %pair,
                    have = venue_prices.len(),
                    need = spec.min_provider_count,
                    "Insufficient venue data, omitting pair"
                );
                omitted.insert(
                    pair.clone(),
                    Omission::InsufficientProviders {
                        have: venue_prices.len(),
                        need: spec.min_provider_count,
                    },
                );
                continue;
            }

            if let Some(price) = median(&venue_prices) {
                trace!(pair = %pair, price = %price, venues = venue_prices.len(), "Pair evaluated");
                resolved.insert(pair.clone(), price);
            }
        }

        let mut prices = LocalPriceSet::new();
        for (pair, price) in resolved {
            if registry.is_enabled(&pair) {
                prices.insert(pair, price);
            }
        }
        for spec in registry.specs().iter().filter(|spec| !spec.enabled) {
            omitted.insert(spec.pair.clone(), Omission::Disabled);
        }

        debug!(
            priced = prices.len(),
            omitted = omitted.len(),
            "Evaluation pass complete"
        );

        EvaluationReport { prices, omitted }
    }

    /// One venue's contribution, or `None` when the venue must be excluded.
    fn venue_price(
        &self,
        registry: &AssetRegistry,
        spec: &AssetSpec,
        venue: &VenueBinding,
        quotes: &QuoteSnapshot,
        resolved: &BTreeMap<AssetPair, Price>,
        now: u64,
    ) -> Option<Price> {
        let Some(quote) = quotes.get(&venue.venue_name, &venue.venue_symbol) else {
            trace!(pair = %spec.pair, venue = %venue.venue_name, "No quote from venue");
            return None;
        };
        if !self.is_fresh(quote, now) {
            trace!(
                pair = %spec.pair,
                venue = %venue.venue_name,
                observed_at = quote.observed_at,
                now,
                "Ignoring quote outside freshness window"
            );
            return None;
        }

        let normalizer = match &venue.normalize_by_pair {
            Some(by) => {
                // Missing when the referenced pair lacked quorum this pass
                let price = resolved.get(by)?;
                let decimals = registry.get(by)?.decimals;
                Some(Normalizer {
                    price: *price,
                    decimals,
                })
            }
            None => None,
        };

        let price = venue_price(&quote.price, venue.invert, normalizer, spec.decimals);
        if price.is_none() {
            trace!(pair = %spec.pair, venue = %venue.venue_name, "Venue quote not convertible");
        }
        price
    }

    fn is_fresh(&self, quote: &RawQuote, now: u64) -> bool {
        let not_stale = quote
            .observed_at
            .saturating_add(self.config.max_quote_age_secs)
            >= now;
        let not_future = quote.observed_at <= now.saturating_add(self.config.max_future_skew_secs);
        not_stale && not_future
    }
}

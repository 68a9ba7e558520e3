//! Validated asset registry
//!
//! The registry is the read-only view of governance configuration the oracle
//! works from. Loading it validates every record and computes the
//! topological evaluation order; a normalization cycle refuses the whole
//! configuration.

use super::entities::NormalizationGraph;
use super::errors::ConfigError;
use crate::algorithms::kahns_topological_sort;
use shared_types::{AssetPair, AssetSpec, MAX_DECIMALS};
use std::collections::HashMap;
use tracing::info;

/// Tracked asset pairs in definition order plus their evaluation order
#[derive(Clone, Debug, Default)]
pub struct AssetRegistry {
    /// Specs in definition order
    specs: Vec<AssetSpec>,
    /// Quick lookup by pair
    index: HashMap<AssetPair, usize>,
    /// Topological order implied by `normalize_by_pair`
    evaluation_order: Vec<AssetPair>,
}

impl AssetRegistry {
    /// Validate `specs` and build the registry.
    pub fn load(specs: Vec<AssetSpec>) -> Result<Self, ConfigError> {
        let mut normalized = Vec::with_capacity(specs.len());
        let mut index = HashMap::with_capacity(specs.len());

        for spec in specs {
            let spec = normalize_spec(spec)?;
            if index.contains_key(&spec.pair) {
                return Err(ConfigError::DuplicatePair(spec.pair.to_string()));
            }
            index.insert(spec.pair.clone(), normalized.len());
            normalized.push(spec);
        }

        let graph = build_graph(&normalized, &index)?;
        let evaluation_order = kahns_topological_sort(&graph)?;

        info!(
            pairs = normalized.len(),
            normalization_edges = graph.edge_count(),
            "Asset registry loaded"
        );

        Ok(Self {
            specs: normalized,
            index,
            evaluation_order,
        })
    }

    /// Parse a JSON array of asset records and load it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let specs: Vec<AssetSpec> =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        Self::load(specs)
    }

    pub fn get(&self, pair: &AssetPair) -> Option<&AssetSpec> {
        self.index.get(pair).map(|&idx| &self.specs[idx])
    }

    pub fn contains(&self, pair: &AssetPair) -> bool {
        self.index.contains_key(pair)
    }

    pub fn is_enabled(&self, pair: &AssetPair) -> bool {
        self.get(pair).map(|spec| spec.enabled).unwrap_or(false)
    }

    /// All specs in definition order
    pub fn specs(&self) -> &[AssetSpec] {
        &self.specs
    }

    /// Pairs in the order they must be evaluated
    pub fn evaluation_order(&self) -> &[AssetPair] {
        &self.evaluation_order
    }

    /// Enabled pairs in definition order.
    ///
    /// This is the vote-extension truncation priority: earlier pairs are
    /// kept, later pairs are dropped first.
    pub fn priority_order(&self) -> Vec<AssetPair> {
        self.specs
            .iter()
            .filter(|spec| spec.enabled)
            .map(|spec| spec.pair.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

/// Upper-case symbols and check every per-record invariant.
fn normalize_spec(mut spec: AssetSpec) -> Result<AssetSpec, ConfigError> {
    spec.pair = normalize_pair(&spec.pair)?;
    let pair = spec.pair.to_string();

    if spec.decimals > MAX_DECIMALS {
        return Err(ConfigError::InvalidDecimals {
            pair,
            decimals: spec.decimals,
            max: MAX_DECIMALS,
        });
    }
    if spec.min_provider_count == 0 {
        return Err(ConfigError::ZeroMinProviders(pair));
    }
    if spec.min_provider_count as usize > spec.venues.len() {
        return Err(ConfigError::UnreachableQuorum {
            pair,
            required: spec.min_provider_count,
            configured: spec.venues.len(),
        });
    }

    for venue in &mut spec.venues {
        if venue.venue_name.trim().is_empty() || venue.venue_symbol.trim().is_empty() {
            return Err(ConfigError::InvalidVenue {
                pair: pair.clone(),
                venue: format!("{}:{}", venue.venue_name, venue.venue_symbol),
            });
        }
        if let Some(by) = venue.normalize_by_pair.take() {
            venue.normalize_by_pair = Some(normalize_pair(&by)?);
        }
    }

    Ok(spec)
}

fn normalize_pair(pair: &AssetPair) -> Result<AssetPair, ConfigError> {
    AssetPair::new(&pair.base, &pair.quote).map_err(|e| ConfigError::InvalidPair {
        pair: pair.to_string(),
        reason: e.to_string(),
    })
}

fn build_graph(
    specs: &[AssetSpec],
    index: &HashMap<AssetPair, usize>,
) -> Result<NormalizationGraph, ConfigError> {
    let mut graph = NormalizationGraph::new();
    for spec in specs {
        graph.add_node(spec.pair.clone());
    }
    for spec in specs {
        for dependency in spec.normalization_dependencies() {
            if !index.contains_key(dependency) {
                return Err(ConfigError::UnknownNormalizationPair {
                    pair: spec.pair.to_string(),
                    missing: dependency.to_string(),
                });
            }
            graph.add_edge(dependency.clone(), spec.pair.clone());
        }
    }
    Ok(graph)
}

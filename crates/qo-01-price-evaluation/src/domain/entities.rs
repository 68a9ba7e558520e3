//! Core entities for Price Evaluation

use shared_types::{AssetPair, LocalPriceSet};
use std::collections::{BTreeMap, BTreeSet};

/// Dependency graph induced by `normalize_by_pair`.
///
/// An edge `Y -> X` means pair `X` has a venue normalized by pair `Y`, so `Y`
/// must be evaluated before `X`. Ordered containers keep traversal
/// deterministic.
#[derive(Debug, Clone, Default)]
pub struct NormalizationGraph {
    /// All pairs
    pub nodes: BTreeSet<AssetPair>,
    /// Adjacency list: dependency -> dependents
    pub adjacency: BTreeMap<AssetPair, BTreeSet<AssetPair>>,
    /// Number of distinct dependencies of each pair
    pub in_degree: BTreeMap<AssetPair, usize>,
}

impl NormalizationGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a pair node
    pub fn add_node(&mut self, pair: AssetPair) {
        self.adjacency.entry(pair.clone()).or_default();
        self.in_degree.entry(pair.clone()).or_insert(0);
        self.nodes.insert(pair);
    }

    /// Record that `dependent` normalizes by `dependency`.
    ///
    /// Repeated edges are collapsed so in-degrees count distinct
    /// dependencies only.
    pub fn add_edge(&mut self, dependency: AssetPair, dependent: AssetPair) {
        let inserted = self
            .adjacency
            .entry(dependency)
            .or_default()
            .insert(dependent.clone());
        if inserted {
            *self.in_degree.entry(dependent).or_insert(0) += 1;
        }
    }

    /// Check if `dependent` normalizes by `dependency`
    pub fn has_edge(&self, dependency: &AssetPair, dependent: &AssetPair) -> bool {
        self.adjacency
            .get(dependency)
            .map(|dependents| dependents.contains(dependent))
            .unwrap_or(false)
    }

    /// Pairs `dependent` normalizes by, in pair order
    pub fn dependencies_of<'a>(
        &'a self,
        dependent: &'a AssetPair,
    ) -> impl Iterator<Item = &'a AssetPair> + 'a {
        self.adjacency
            .iter()
            .filter(move |(_, dependents)| dependents.contains(dependent))
            .map(|(dependency, _)| dependency)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(BTreeSet::len).sum()
    }
}

/// Why a pair is absent from the local price set
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Omission {
    /// Fewer venues produced a price than the pair's quorum
    InsufficientProviders { have: usize, need: u32 },
    /// Pair is evaluated (others may normalize by it) but not reported
    Disabled,
}

/// Outcome of one evaluation pass
#[derive(Clone, Debug, Default)]
pub struct EvaluationReport {
    /// Prices of every enabled pair with enough venue data
    pub prices: LocalPriceSet,
    /// Pairs left out of `prices`, with the reason
    pub omitted: BTreeMap<AssetPair, Omission>,
}

impl EvaluationReport {
    pub fn is_omitted(&self, pair: &AssetPair) -> bool {
        self.omitted.contains_key(pair)
    }
}

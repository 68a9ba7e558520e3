//! Kahn's Topological Sort over the normalization graph
//!
//! O(V + E). Produces the order pairs must be evaluated in so that every
//! `normalize_by_pair` price is computed before the pairs that use it, and
//! detects cycles structurally.

use crate::domain::entities::NormalizationGraph;
use crate::domain::errors::ConfigError;
use shared_types::AssetPair;
use std::collections::{BTreeMap, BTreeSet};

/// Perform Kahn's topological sort on the normalization graph.
///
/// Pairs with no remaining dependencies are released level by level; each
/// level is emitted in pair lexical order so every node computes the same
/// order from the same configuration.
pub fn kahns_topological_sort(graph: &NormalizationGraph) -> Result<Vec<AssetPair>, ConfigError> {
    if graph.nodes.is_empty() {
        return Ok(Vec::new());
    }

    // 1. Copy in-degree map (we'll modify it)
    let mut in_degree: BTreeMap<AssetPair, usize> = graph.in_degree.clone();

    // 2. Initialize queue with zero in-degree nodes (BTreeMap iteration is sorted)
    let mut queue: Vec<AssetPair> = in_degree
        .iter()
        .filter(|(_, &degree)| degree == 0)
        .map(|(pair, _)| pair.clone())
        .collect();

    let mut order: Vec<AssetPair> = Vec::with_capacity(graph.node_count());

    // 3. Release one level at a time
    while !queue.is_empty() {
        let current_level = std::mem::take(&mut queue);
        let mut next_queue: Vec<AssetPair> = Vec::new();

        for node in &current_level {
            let Some(dependents) = graph.adjacency.get(node) else {
                continue;
            };
            for dependent in dependents {
                let Some(degree) = in_degree.get_mut(dependent) else {
                    continue;
                };
                *degree = degree.saturating_sub(1);
                if *degree == 0 {
                    next_queue.push(dependent.clone());
                }
            }
        }

        order.extend(current_level);

        // Sort next level for determinism
        next_queue.sort();
        queue = next_queue;
    }

    // 4. Cycle detection: if not all nodes were released, there's a cycle
    if order.len() < graph.node_count() {
        let released: BTreeSet<&AssetPair> = order.iter().collect();
        let remaining: BTreeSet<&AssetPair> = graph
            .nodes
            .iter()
            .filter(|pair| !released.contains(pair))
            .collect();
        return Err(ConfigError::NormalizationCycle {
            path: describe_cycle(graph, &remaining),
        });
    }

    Ok(order)
}

/// Walk dependencies from the smallest unreleased pair until a pair repeats.
///
/// Every unreleased pair still has an unreleased dependency, so the walk
/// stays inside `remaining` and must close a loop. The path is rendered in
/// "normalizes by" direction: `A -> B` means A normalizes by B.
fn describe_cycle(graph: &NormalizationGraph, remaining: &BTreeSet<&AssetPair>) -> String {
    let Some(&start) = remaining.iter().next() else {
        return String::from("<unknown>");
    };

    let mut path: Vec<&AssetPair> = vec![start];
    let mut current: &AssetPair = start;
    loop {
        let next = graph
            .dependencies_of(current)
            .find(|dependency| remaining.contains(dependency));
        let Some(next) = next else {
            break;
        };
        if let Some(pos) = path.iter().position(|pair| *pair == next) {
            let mut cycle: Vec<String> = path[pos..].iter().map(ToString::to_string).collect();
            cycle.push(next.to_string());
            return cycle.join(" -> ");
        }
        path.push(next);
        current = next;
    }

    path.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" -> ")
}

//! Stake-weighted median
//!
//! Sort reported prices ascending, walk accumulating voting power, and stop
//! at the first price where accumulated power reaches half the reporting
//! power. If it lands exactly on half and a higher price follows, the
//! result is the half-to-even midpoint of the two.

use shared_types::Price;
use std::collections::BTreeMap;

/// Weighted median of `(price, power)` samples.
///
/// Returns `None` when there are no samples or the total power is zero.
/// The result does not depend on sample order.
pub fn weighted_median(samples: &[(Price, u64)]) -> Option<Price> {
    // Equal prices merge so every step of the walk is a distinct value
    let mut buckets: BTreeMap<Price, u128> = BTreeMap::new();
    for (price, power) in samples {
        *buckets.entry(*price).or_insert(0) += u128::from(*power);
    }

    let total: u128 = buckets.values().sum();
    if total == 0 {
        return None;
    }

    let mut accumulated: u128 = 0;
    let mut walk = buckets.into_iter().filter(|(_, power)| *power > 0).peekable();
    while let Some((price, power)) = walk.next() {
        accumulated += power;
        let doubled = accumulated * 2;
        if doubled < total {
            continue;
        }
        if doubled == total {
            if let Some((next, _)) = walk.peek() {
                return Some(Price::midpoint(price, *next));
            }
        }
        return Some(price);
    }
    None
}

//! Median of per-venue prices

use shared_types::Price;

/// Median of `prices`; the two middle values are averaged (half-to-even)
/// for an even count. `None` for an empty slice.
pub fn median(prices: &[Price]) -> Option<Price> {
    if prices.is_empty() {
        return None;
    }
    let mut sorted = prices.to_vec();
    sorted.sort_unstable();

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        Some(sorted[mid])
    } else {
        Some(Price::midpoint(sorted[mid - 1], sorted[mid]))
    }
}

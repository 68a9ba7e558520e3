//! Supermajority check

/// `reporting / total >= numerator / denominator`, compared by
/// cross-multiplication in 128 bits so no precision is lost.
pub fn meets_threshold(reporting: u128, total: u128, numerator: u64, denominator: u64) -> bool {
    if total == 0 {
        return false;
    }
    reporting.saturating_mul(u128::from(denominator))
        >= total.saturating_mul(u128::from(numerator))
}

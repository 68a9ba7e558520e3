//! # Oracle Metrics
//!
//! Prometheus metrics for the oracle hooks.
//!
//! ## Usage
//!
//! Enable with the `metrics` feature:
//! ```toml
//! qo-05-oracle-hooks = { path = "...", features = ["metrics"] }
//! ```
//!
//! ## Metrics Exported
//!
//! - `oracle_vote_extension_bytes` - Histogram of produced extension sizes
//! - `oracle_vote_extensions_rejected_total` - Counter of rejected peer extensions (by reason)
//! - `oracle_proposals_rejected_total` - Counter of rejected proposals (by reason)
//! - `oracle_pairs_updated_total` - Counter of pair prices written at finalization

#[cfg(feature = "metrics")]
use lazy_static::lazy_static;

#[cfg(feature = "metrics")]
use prometheus::{
    register_counter_vec, register_histogram, register_int_counter, CounterVec, Histogram,
    IntCounter,
};

#[cfg(feature = "metrics")]
lazy_static! {
    /// Size of locally produced vote extensions
    pub static ref VOTE_EXTENSION_BYTES: Histogram = register_histogram!(
        "oracle_vote_extension_bytes",
        "Size of produced vote extensions in bytes",
        vec![0.0, 64.0, 256.0, 1024.0, 4096.0, 16384.0, 65536.0]
    )
    .expect("Failed to create VOTE_EXTENSION_BYTES metric");

    /// Peer vote extensions rejected, labeled by reason
    pub static ref VOTE_EXTENSIONS_REJECTED: CounterVec = register_counter_vec!(
        "oracle_vote_extensions_rejected_total",
        "Total number of peer vote extensions rejected",
        &["reason"]
    )
    .expect("Failed to create VOTE_EXTENSIONS_REJECTED metric");

    /// Proposals rejected, labeled by reason
    pub static ref PROPOSALS_REJECTED: CounterVec = register_counter_vec!(
        "oracle_proposals_rejected_total",
        "Total number of proposals rejected by the oracle",
        &["reason"]
    )
    .expect("Failed to create PROPOSALS_REJECTED metric");

    /// Pair prices written to chain state
    pub static ref PAIRS_UPDATED: IntCounter = register_int_counter!(
        "oracle_pairs_updated_total",
        "Total number of pair prices written at finalization"
    )
    .expect("Failed to create PAIRS_UPDATED metric");
}

/// Record the size of a produced vote extension
#[cfg(feature = "metrics")]
pub fn record_vote_extension_size(bytes: usize) {
    VOTE_EXTENSION_BYTES.observe(bytes as f64);
}

/// Record a rejected peer extension with reason
#[cfg(feature = "metrics")]
pub fn record_vote_extension_rejected(reason: &str) {
    VOTE_EXTENSIONS_REJECTED.with_label_values(&[reason]).inc();
}

/// Record a rejected proposal with reason
#[cfg(feature = "metrics")]
pub fn record_proposal_rejected(reason: &str) {
    PROPOSALS_REJECTED.with_label_values(&[reason]).inc();
}

/// Record pairs written at finalization
#[cfg(feature = "metrics")]
pub fn record_pairs_updated(count: usize) {
    PAIRS_UPDATED.inc_by(count as u64);
}

// No-op implementations when metrics feature is disabled
#[cfg(not(feature = "metrics"))]
pub fn record_vote_extension_size(_bytes: usize) {}

#[cfg(not(feature = "metrics"))]
pub fn record_vote_extension_rejected(_reason: &str) {}

#[cfg(not(feature = "metrics"))]
pub fn record_proposal_rejected(_reason: &str) {}

#[cfg(not(feature = "metrics"))]
pub fn record_pairs_updated(_count: usize) {}

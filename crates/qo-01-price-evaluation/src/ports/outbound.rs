//! Outbound ports (driven side)

use crate::adapters::QuoteSnapshot;

/// Source of raw venue quotes.
///
/// The evaluator reads one snapshot per pass, so every pair in the pass sees
/// the same quotes regardless of concurrent ingestion.
pub trait QuoteSource: Send + Sync {
    fn snapshot(&self) -> QuoteSnapshot;
}

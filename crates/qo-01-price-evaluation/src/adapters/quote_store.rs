//! In-memory latest-quote store
//!
//! Venue clients write concurrently; the evaluator reads a consistent
//! snapshot. Only the newest observation per `(venue, symbol)` is kept.

use crate::ports::outbound::QuoteSource;
use parking_lot::RwLock;
use shared_types::RawQuote;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::trace;

type SourceKey = (String, String);

/// Immutable view of the latest quotes at one instant
#[derive(Clone, Debug, Default)]
pub struct QuoteSnapshot {
    quotes: HashMap<SourceKey, RawQuote>,
}

impl QuoteSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a snapshot directly, keeping the newest quote per source.
    pub fn from_quotes(quotes: impl IntoIterator<Item = RawQuote>) -> Self {
        let mut snapshot = Self::new();
        for quote in quotes {
            snapshot.upsert(quote);
        }
        snapshot
    }

    /// Latest quote for a venue/symbol
    pub fn get(&self, venue_name: &str, venue_symbol: &str) -> Option<&RawQuote> {
        self.quotes
            .get(&(venue_name.to_string(), venue_symbol.to_string()))
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    /// Returns `false` when an equal or newer quote is already held.
    fn upsert(&mut self, quote: RawQuote) -> bool {
        let key = quote.source_key();
        match self.quotes.get(&key) {
            Some(existing) if existing.observed_at >= quote.observed_at => false,
            _ => {
                self.quotes.insert(key, quote);
                true
            }
        }
    }
}

/// Shared, thread-safe quote store
#[derive(Clone, Debug, Default)]
pub struct QuoteStore {
    inner: Arc<RwLock<QuoteSnapshot>>,
}

impl QuoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a quote. Out-of-order (older) observations are ignored.
    pub fn record(&self, quote: RawQuote) -> bool {
        let venue = quote.venue_name.clone();
        let symbol = quote.venue_symbol.clone();
        let accepted = self.inner.write().upsert(quote);
        if !accepted {
            trace!(venue = %venue, symbol = %symbol, "Ignoring stale quote update");
        }
        accepted
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }
}

impl QuoteSource for QuoteStore {
    fn snapshot(&self) -> QuoteSnapshot {
        self.inner.read().clone()
    }
}

//! # Raw Venue Quote
//!
//! Ephemeral observation pushed in by venue clients.

use crate::decimal::FixedDecimal;

/// A single venue observation. Never persisted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawQuote {
    pub venue_name: String,
    pub venue_symbol: String,
    pub price: FixedDecimal,
    /// Unix timestamp (seconds) the venue reported the quote at.
    pub observed_at: u64,
}

impl RawQuote {
    pub fn new(
        venue_name: impl Into<String>,
        venue_symbol: impl Into<String>,
        price: FixedDecimal,
        observed_at: u64,
    ) -> Self {
        Self {
            venue_name: venue_name.into(),
            venue_symbol: venue_symbol.into(),
            price,
            observed_at,
        }
    }

    /// Key a quote is stored under: `(venue, symbol)`.
    pub fn source_key(&self) -> (String, String) {
        (self.venue_name.clone(), self.venue_symbol.clone())
    }
}

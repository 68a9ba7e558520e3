//! Adapters for Price Evaluation
//!
//! - `quote_store`: latest-quote store implementing `QuoteSource`
//! - `ingestion`: tokio task feeding the store from venue clients

pub mod ingestion;
pub mod quote_store;

pub use ingestion::spawn_quote_ingestion;
pub use quote_store::{QuoteSnapshot, QuoteStore};

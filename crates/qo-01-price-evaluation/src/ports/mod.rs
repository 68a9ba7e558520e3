//! Ports for Price Evaluation

pub mod outbound;

pub use outbound::QuoteSource;

//! # QO-01: Price Evaluation Subsystem
//!
//! Turns raw per-venue quotes into one fixed-point price per tracked asset
//! pair, producing the validator's [`LocalPriceSet`](shared_types::LocalPriceSet).
//!
//! ## Architecture
//!
//! - **Domain**: `AssetRegistry` (validated configuration), normalization
//!   graph, evaluation report
//! - **Algorithms**: Kahn's sort over the normalization graph, exact rational
//!   conversion with a single half-to-even rounding, median
//! - **Ports**: Outbound `QuoteSource` (consistent quote snapshots)
//! - **Adapters**: `QuoteStore` and the tokio ingestion task feeding it
//! - **Service**: `PriceEvaluator`
//!
//! ## Evaluation Pipeline
//!
//! ```text
//! RawQuote ──→ QuoteStore ──snapshot──→ PriceEvaluator ──→ LocalPriceSet
//!                                            ↑
//!                         AssetRegistry (topological evaluation order)
//! ```
//!
//! A cycle in the `normalize_by_pair` graph is rejected when the registry is
//! loaded, never during evaluation.

pub mod adapters;
pub mod algorithms;
pub mod config;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::{spawn_quote_ingestion, QuoteSnapshot, QuoteStore};
pub use config::EvaluationConfig;
pub use domain::entities::{EvaluationReport, NormalizationGraph, Omission};
pub use domain::errors::ConfigError;
pub use domain::registry::AssetRegistry;
pub use ports::outbound::QuoteSource;
pub use service::PriceEvaluator;

//! # Cross-Subsystem Integration
//!
//! - `network`: simulated validator set and consensus driver
//! - `block_lifecycle`: convergence, threshold and byzantine-proposer cases
//! - `quote_pipeline`: async quote ingestion feeding `extend_vote`

pub mod block_lifecycle;
pub mod network;
pub mod quote_pipeline;

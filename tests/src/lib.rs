//! # Quantum-Chain Oracle Test Suite
//!
//! Unified test crate exercising the oracle subsystems together.
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── benches/          # criterion benchmarks (aggregation, codecs, evaluation)
//! └── src/integration/  # cross-subsystem block lifecycle
//!     ├── network.rs          # simulated validator set
//!     ├── block_lifecycle.rs  # extend → verify → prepare → process → finalize
//!     └── quote_pipeline.rs   # ingestion task feeding the hooks
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p qo-tests
//!
//! # With logs
//! RUST_LOG=debug cargo test -p qo-tests -- --nocapture
//!
//! # Benchmarks
//! cargo bench -p qo-tests
//! ```

#![allow(dead_code)]

pub mod integration;

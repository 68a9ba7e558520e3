//! # QO-05: Oracle Consensus Hooks
//!
//! Wires price evaluation, vote extensions, the extended commit and
//! stake-weighted aggregation into the five consensus call sites.
//!
//! ## Hooks
//!
//! | Hook | Runs on | Effect |
//! |------|---------|--------|
//! | `extend_vote` | every validator, height H | local prices as extension bytes |
//! | `verify_vote_extension` | every validator, height H | accept/reject a peer's bytes |
//! | `prepare_proposal` | proposer, H+1 | oracle tx at the head of the block |
//! | `process_proposal` | every validator, H+1 | recompute and compare prices |
//! | `finalize_block` | every validator, H+1 | write prices to the `PriceStore` |
//!
//! ## Determinism
//!
//! `process_proposal` and `finalize_block` depend only on the proposal bytes,
//! the asset registry and the chain id. Local quotes are read by
//! `extend_vote` alone.

pub mod adapters;
pub mod config;
pub mod domain;
pub mod metrics;
pub mod ports;
pub mod service;

pub use adapters::{Ed25519Signer, Ed25519Verifier, InMemoryPriceStore};
pub use config::OracleConfig;
pub use domain::entities::{extension_sign_bytes, PriceUpdate, QuotePrice};
pub use domain::errors::{OracleError, OracleResult, PriceStoreError, SignatureError};
pub use domain::proposal::{OracleProposal, ORACLE_TX_PREFIX};
pub use domain::requests::{
    ExtendVoteRequest, ExtendVoteResponse, FinalizeBlockRequest, FinalizeBlockResponse,
    PrepareProposalRequest, PrepareProposalResponse, ProcessProposalRequest, ProposalRejection,
    ProposalStatus, VerifyStatus, VerifyVoteExtensionRequest,
};
pub use ports::outbound::{ExtensionSignatureVerifier, PriceStore};
pub use service::OracleHooks;

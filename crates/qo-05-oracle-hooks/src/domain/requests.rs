//! Hook request and response types
//!
//! Mirrors the shape of the consensus engine's callbacks, reduced to what
//! the oracle reads and returns.

use shared_types::{CanonicalPriceSet, ExtendedCommitEntry, ValidatorId};
use std::time::Instant;

/// Produce-local-extension input
#[derive(Clone, Debug)]
pub struct ExtendVoteRequest {
    pub height: u64,
    pub round: u32,
    /// Block time (unix seconds) quotes are judged fresh against
    pub block_time: u64,
    /// Past this instant the validator abstains instead of extending
    pub deadline: Option<Instant>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExtendVoteResponse {
    /// Empty means "no vote"
    pub vote_extension: Vec<u8>,
}

/// Verify-peer-extension input
#[derive(Clone, Debug)]
pub struct VerifyVoteExtensionRequest {
    pub validator: ValidatorId,
    pub height: u64,
    pub round: u32,
    pub vote_extension: Vec<u8>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VerifyStatus {
    Accept,
    Reject,
}

/// Assemble-proposal input
#[derive(Clone, Debug)]
pub struct PrepareProposalRequest {
    pub height: u64,
    /// Round in which the previous height's commit was reached
    pub commit_round: u32,
    /// Previous height's extended commit as seen by the proposer
    pub local_last_commit: Vec<ExtendedCommitEntry>,
    /// Mempool transactions offered by the engine
    pub txs: Vec<Vec<u8>>,
    pub max_tx_bytes: usize,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PrepareProposalResponse {
    pub txs: Vec<Vec<u8>>,
}

/// Validate-proposal input
#[derive(Clone, Debug)]
pub struct ProcessProposalRequest {
    pub height: u64,
    pub txs: Vec<Vec<u8>>,
}

/// Why a proposal was rejected
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProposalRejection {
    MissingOracleTx,
    UnexpectedOracleTx,
    MalformedOracleTx,
    MalformedCommit,
    InvalidSignature,
    InvalidExtension,
    PriceMismatch,
}

impl ProposalRejection {
    /// Stable label for logs and metrics
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingOracleTx => "missing_oracle_tx",
            Self::UnexpectedOracleTx => "unexpected_oracle_tx",
            Self::MalformedOracleTx => "malformed_oracle_tx",
            Self::MalformedCommit => "malformed_commit",
            Self::InvalidSignature => "invalid_signature",
            Self::InvalidExtension => "invalid_extension",
            Self::PriceMismatch => "price_mismatch",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProposalStatus {
    Accept,
    Reject(ProposalRejection),
}

/// Finalize-block input
#[derive(Clone, Debug)]
pub struct FinalizeBlockRequest {
    pub height: u64,
    pub txs: Vec<Vec<u8>>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FinalizeBlockResponse {
    /// Prices written to chain state at this height
    pub updated: CanonicalPriceSet,
}

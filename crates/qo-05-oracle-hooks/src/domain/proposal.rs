//! Oracle proposal transaction
//!
//! The proposer injects exactly one of these at the head of the block when
//! the previous height had vote extensions. It carries the encoded extended
//! commit and the prices the proposer aggregated from it, so every validator
//! can recompute and compare.

use crate::domain::errors::OracleError;
use bincode::Options;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, Bytes};
use shared_types::pair::MAX_SYMBOL_LEN;
use shared_types::CanonicalPriceSet;

/// Marks a transaction as the oracle transaction
pub const ORACLE_TX_PREFIX: &[u8; 4] = b"QOTX";

/// Largest encoded price entry: two length-prefixed symbols and a price
const MAX_PRICE_ENTRY_LEN: usize = 8 + MAX_SYMBOL_LEN + 8 + MAX_SYMBOL_LEN + 32;

fn wire_options() -> impl Options + Copy {
    bincode::DefaultOptions::new().with_fixint_encoding()
}

#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OracleProposal {
    /// Round of the commit the extensions were signed in
    pub commit_round: u32,
    /// Extended commit codec output
    #[serde_as(as = "Bytes")]
    pub extended_commit: Vec<u8>,
    /// Proposer's aggregation of `extended_commit`
    pub prices: CanonicalPriceSet,
}

impl OracleProposal {
    /// Whether `tx` claims to be an oracle transaction
    pub fn is_oracle_tx(tx: &[u8]) -> bool {
        tx.starts_with(ORACLE_TX_PREFIX)
    }

    /// Upper bound on an encoded oracle tx whose commit is at most
    /// `max_commit_bytes` and whose prices cover at most `max_pairs` pairs.
    ///
    /// Layout: prefix, `commit_round`, length-prefixed commit, then the
    /// length-prefixed price map.
    pub fn max_encoded_len(max_commit_bytes: usize, max_pairs: usize) -> usize {
        ORACLE_TX_PREFIX.len()
            + 4
            + 8
            + max_commit_bytes
            + 8
            + max_pairs.saturating_mul(MAX_PRICE_ENTRY_LEN)
    }

    pub fn encode(&self) -> Result<Vec<u8>, OracleError> {
        let body = wire_options()
            .serialize(self)
            .map_err(|e| OracleError::MalformedOracleTx(e.to_string()))?;
        let mut tx = Vec::with_capacity(ORACLE_TX_PREFIX.len() + body.len());
        tx.extend_from_slice(ORACLE_TX_PREFIX);
        tx.extend_from_slice(&body);
        Ok(tx)
    }

    pub fn decode(tx: &[u8], max_bytes: usize) -> Result<Self, OracleError> {
        if tx.len() > max_bytes {
            return Err(OracleError::OracleTxTooLarge {
                size: tx.len(),
                max: max_bytes,
            });
        }
        let Some(body) = tx.strip_prefix(ORACLE_TX_PREFIX.as_slice()) else {
            return Err(OracleError::MalformedOracleTx(
                "missing oracle tx prefix".to_string(),
            ));
        };
        wire_options()
            .with_limit(max_bytes as u64)
            .deserialize(body)
            .map_err(|e| OracleError::MalformedOracleTx(e.to_string()))
    }
}

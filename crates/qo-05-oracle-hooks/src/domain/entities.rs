//! Core entities for the Oracle Hooks

use serde::{Deserialize, Serialize};
use shared_types::{AssetPair, Price};

/// Chain-state price of one pair
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotePrice {
    pub price: Price,
    pub decimals: u8,
    /// Height of the block that last wrote this price
    pub block_height: u64,
    /// Number of times the price has been written
    pub nonce: u64,
}

/// One pair's write at finalization
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PriceUpdate {
    pub pair: AssetPair,
    pub price: Price,
    pub decimals: u8,
}

/// Bytes a validator signs over its vote extension:
/// `len(chain_id) | chain_id | height | round | extension`, integers
/// little-endian.
pub fn extension_sign_bytes(chain_id: &str, height: u64, round: u32, extension: &[u8]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(4 + chain_id.len() + 8 + 4 + extension.len());
    bytes.extend_from_slice(&(chain_id.len() as u32).to_le_bytes());
    bytes.extend_from_slice(chain_id.as_bytes());
    bytes.extend_from_slice(&height.to_le_bytes());
    bytes.extend_from_slice(&round.to_le_bytes());
    bytes.extend_from_slice(extension);
    bytes
}

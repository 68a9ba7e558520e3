//! Outbound ports (driven side)

use crate::domain::entities::{PriceUpdate, QuotePrice};
use crate::domain::errors::{PriceStoreError, SignatureError};
use shared_types::{AssetPair, ValidatorId};

/// Chain-state price storage.
///
/// Written once per finalized height; read by anything that needs the
/// current on-chain price.
pub trait PriceStore: Send + Sync {
    /// Current price of a pair, if it has ever been written
    fn get_price(&self, pair: &AssetPair) -> Option<QuotePrice>;

    /// Write one block's prices. Fails if `height` is not above the last
    /// written height.
    fn write_block_prices(&self, height: u64, updates: &[PriceUpdate])
        -> Result<(), PriceStoreError>;

    /// Height of the last write
    fn last_height(&self) -> Option<u64>;
}

/// Verifies a validator's signature over its vote-extension sign bytes
pub trait ExtensionSignatureVerifier: Send + Sync {
    fn verify(
        &self,
        validator: &ValidatorId,
        sign_bytes: &[u8],
        signature: &[u8],
    ) -> Result<(), SignatureError>;
}

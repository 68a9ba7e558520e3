//! Canonical payload carried inside a vote-extension frame

use serde::{Deserialize, Serialize};
use shared_types::{AssetPair, Price};

/// Frame format version
pub const FRAME_VERSION: u8 = 1;

/// `version | compressor id | crc32 (LE)`
pub const FRAME_HEADER_LEN: usize = 6;

/// One reported price
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceEntry {
    pub pair: AssetPair,
    /// Always 32 bytes on the wire
    pub price: Price,
}

/// Serialized (uncompressed) form of a local price set.
///
/// Canonical form: entries strictly ascending by pair.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricePayload {
    pub entries: Vec<PriceEntry>,
}

impl PricePayload {
    /// Index of the first entry that breaks strict ascending order, if any.
    pub fn first_order_violation(&self) -> Option<usize> {
        self.entries
            .windows(2)
            .position(|pair| pair[0].pair >= pair[1].pair)
            .map(|idx| idx + 1)
    }
}

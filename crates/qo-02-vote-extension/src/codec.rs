//! # Vote Extension Codec
//!
//! Two-stage pipeline between a [`LocalPriceSet`] and the bytes a validator
//! attaches to its precommit:
//!
//! ```text
//! encode: LocalPriceSet ─→ rank + truncate ─→ bincode (sorted) ─→ crc32 ─→ compress ─→ frame
//! decode: frame ─→ header checks ─→ bounded decompress ─→ crc32 ─→ bincode ─→ canonical checks
//! ```
//!
//! `max_bytes` bounds the whole frame. If compression pushes a frame over it,
//! encode keeps dropping the lowest-priority entry until it fits.
//!
//! ## Frame
//!
//! | Offset | Size | Field |
//! |--------|------|-------|
//! | 0 | 1 | version (`1`) |
//! | 1 | 1 | compressor id |
//! | 2 | 4 | crc32 of the uncompressed payload, little-endian |
//! | 6 | .. | compressed payload |
//!
//! An empty byte string is "no vote": it is what an empty price set encodes
//! to and decodes from.

use crate::config::VoteExtensionConfig;
use crate::domain::errors::{VoteExtensionError, VoteExtensionResult};
use crate::domain::payload::{PriceEntry, PricePayload, FRAME_HEADER_LEN, FRAME_VERSION};
use crate::ports::outbound::ExtensionCompressor;
use bincode::Options;
use shared_types::{AssetPair, LocalPriceSet};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{trace, warn};

/// Result of encoding a local price set
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EncodedExtension {
    /// Wire bytes; empty when nothing was reported
    pub bytes: Vec<u8>,
    /// Pairs dropped to respect the size ceiling, lowest priority last
    pub dropped: Vec<AssetPair>,
}

/// Fixed-int little-endian bincode that rejects trailing bytes
fn wire_options() -> impl Options + Copy {
    bincode::DefaultOptions::new().with_fixint_encoding()
}

/// Vote Extension Codec
///
/// Holds the process-wide compressor. Cheap to clone.
#[derive(Clone)]
pub struct VoteExtensionCodec {
    config: VoteExtensionConfig,
    compressor: Arc<dyn ExtensionCompressor>,
}

impl std::fmt::Debug for VoteExtensionCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VoteExtensionCodec")
            .field("config", &self.config)
            .field("compressor_id", &self.compressor.id())
            .finish()
    }
}

impl VoteExtensionCodec {
    pub fn new(config: VoteExtensionConfig, compressor: Arc<dyn ExtensionCompressor>) -> Self {
        Self { config, compressor }
    }

    /// Codec using zstd at the configured level
    #[cfg(feature = "compression")]
    pub fn with_zstd(config: VoteExtensionConfig) -> Self {
        let compressor = crate::adapters::ZstdCompressor::new(config.compression_level);
        Self::new(config, Arc::new(compressor))
    }

    pub fn config(&self) -> &VoteExtensionConfig {
        &self.config
    }

    pub fn compressor_id(&self) -> u8 {
        self.compressor.id()
    }

    /// Encode with lexical pair order as the truncation priority.
    pub fn encode(&self, prices: &LocalPriceSet) -> VoteExtensionResult<Vec<u8>> {
        Ok(self.encode_with_priority(prices, &[])?.bytes)
    }

    /// Encode, dropping the lowest-priority pairs if the frame would exceed
    /// `max_bytes`.
    ///
    /// Priority is `priority` first (earlier = kept longer), then any
    /// remaining pairs in lexical order. The kept entries are always a prefix
    /// of that ranking, so the output is a pure function of the inputs.
    pub fn encode_with_priority(
        &self,
        prices: &LocalPriceSet,
        priority: &[AssetPair],
    ) -> VoteExtensionResult<EncodedExtension> {
        let ranked = rank_entries(prices, priority);
        let (mut kept, mut dropped) = self.truncate(ranked)?;

        // The prefix fits uncompressed; the compressor may still grow it.
        let bytes = loop {
            if kept.is_empty() {
                break Vec::new();
            }
            let frame = self.frame(&kept)?;
            if frame.len() <= self.config.max_bytes {
                break frame;
            }
            if let Some(entry) = kept.pop() {
                dropped.insert(0, entry.pair);
            }
        };

        if !dropped.is_empty() {
            warn!(
                kept = kept.len(),
                dropped = dropped.len(),
                max_bytes = self.config.max_bytes,
                "Vote extension exceeds size ceiling, dropping lowest-priority pairs"
            );
        }

        Ok(EncodedExtension { bytes, dropped })
    }

    /// Decode wire bytes. Never returns partial data.
    pub fn decode(&self, bytes: &[u8]) -> VoteExtensionResult<LocalPriceSet> {
        if bytes.is_empty() {
            return Ok(LocalPriceSet::new());
        }
        if bytes.len() < FRAME_HEADER_LEN {
            return Err(VoteExtensionError::FrameTooShort { len: bytes.len() });
        }
        if bytes.len() > self.config.max_bytes {
            return Err(VoteExtensionError::FrameTooLarge {
                len: bytes.len(),
                max: self.config.max_bytes,
            });
        }

        let version = bytes[0];
        if version != FRAME_VERSION {
            return Err(VoteExtensionError::UnsupportedVersion(version));
        }
        let found = bytes[1];
        if found != self.compressor.id() {
            return Err(VoteExtensionError::CompressorMismatch {
                expected: self.compressor.id(),
                found,
            });
        }
        let expected = u32::from_le_bytes([bytes[2], bytes[3], bytes[4], bytes[5]]);

        let serialized = self
            .compressor
            .decompress(&bytes[FRAME_HEADER_LEN..], self.config.max_bytes)?;
        let computed = crc32fast::hash(&serialized);
        if computed != expected {
            return Err(VoteExtensionError::ChecksumMismatch { expected, computed });
        }

        let payload: PricePayload = wire_options()
            .with_limit(self.config.max_bytes as u64)
            .deserialize(&serialized)
            .map_err(|e| VoteExtensionError::Malformed(e.to_string()))?;

        if payload.entries.is_empty() {
            return Err(VoteExtensionError::Malformed(
                "empty entry list in non-empty frame".to_string(),
            ));
        }
        if let Some(index) = payload.first_order_violation() {
            return Err(VoteExtensionError::NonCanonicalOrder { index });
        }
        for entry in &payload.entries {
            entry
                .pair
                .validate()
                .map_err(|_| VoteExtensionError::InvalidPair(entry.pair.to_string()))?;
        }

        Ok(payload
            .entries
            .into_iter()
            .map(|entry| (entry.pair, entry.price))
            .collect())
    }

    /// Build the wire frame for `entries`, which may be in any order.
    fn frame(&self, entries: &[PriceEntry]) -> VoteExtensionResult<Vec<u8>> {
        let mut sorted = entries.to_vec();
        sorted.sort_by(|a, b| a.pair.cmp(&b.pair));
        let payload = PricePayload { entries: sorted };
        let serialized = wire_options()
            .serialize(&payload)
            .map_err(|e| VoteExtensionError::Serialization(e.to_string()))?;

        let checksum = crc32fast::hash(&serialized);
        let compressed = self.compressor.compress(&serialized)?;

        let mut bytes = Vec::with_capacity(FRAME_HEADER_LEN + compressed.len());
        bytes.push(FRAME_VERSION);
        bytes.push(self.compressor.id());
        bytes.extend_from_slice(&checksum.to_le_bytes());
        bytes.extend_from_slice(&compressed);

        trace!(
            entries = payload.entries.len(),
            payload_bytes = serialized.len(),
            bytes = bytes.len(),
            "Vote extension frame built"
        );
        Ok(bytes)
    }

    /// Keep the longest prefix of `ranked` whose payload plus frame header
    /// fits `max_bytes`.
    fn truncate(
        &self,
        ranked: Vec<PriceEntry>,
    ) -> VoteExtensionResult<(Vec<PriceEntry>, Vec<AssetPair>)> {
        let options = wire_options();
        let size_of_err = |e: bincode::Error| VoteExtensionError::Serialization(e.to_string());

        let mut size = options
            .serialized_size(&PricePayload::default())
            .map_err(size_of_err)?;
        let limit = self.config.max_bytes.saturating_sub(FRAME_HEADER_LEN) as u64;

        let mut kept = Vec::with_capacity(ranked.len());
        let mut ranked = ranked.into_iter();
        for entry in ranked.by_ref() {
            let entry_size = options.serialized_size(&entry).map_err(size_of_err)?;
            if size + entry_size > limit {
                let mut dropped = vec![entry.pair];
                dropped.extend(ranked.map(|entry| entry.pair));
                return Ok((kept, dropped));
            }
            size += entry_size;
            kept.push(entry);
        }
        Ok((kept, Vec::new()))
    }
}

/// Entries in truncation-priority order: listed pairs first, the rest
/// lexically. Listed pairs absent from `prices` are skipped.
fn rank_entries(prices: &LocalPriceSet, priority: &[AssetPair]) -> Vec<PriceEntry> {
    let mut seen: BTreeSet<&AssetPair> = BTreeSet::new();
    let mut ranked = Vec::with_capacity(prices.len());

    for pair in priority {
        if let Some(price) = prices.get(pair) {
            if seen.insert(pair) {
                ranked.push(PriceEntry {
                    pair: pair.clone(),
                    price: *price,
                });
            }
        }
    }
    for (pair, price) in prices {
        if !seen.contains(pair) {
            ranked.push(PriceEntry {
                pair: pair.clone(),
                price: *price,
            });
        }
    }
    ranked
}

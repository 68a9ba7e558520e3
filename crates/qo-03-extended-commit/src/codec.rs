//! # Extended Commit Codec
//!
//! Encodes the ordered list of `(validator, voting power, vote extension,
//! signature)` entries carried in a proposal, and decodes it back.
//!
//! Wire format: one version byte followed by the fixed-int bincode encoding
//! of the entry list. Extensions are opaque here; their contents are checked
//! by the vote-extension codec.
//!
//! Encode and decode enforce the same structural rules so that
//! `decode(encode(x)) == x` for every list `encode` accepts:
//!
//! - at most `max_entries` entries and `max_bytes` encoded bytes
//! - canonical order, no duplicate validator
//! - a signature of exactly `signature_len` bytes on every entry with an
//!   extension, and no signature on entries without one

use crate::config::ExtendedCommitConfig;
use crate::domain::errors::{ExtendedCommitError, ExtendedCommitResult};
use crate::domain::ordering::canonical_cmp;
use bincode::Options;
use shared_types::{ExtendedCommitEntry, ValidatorId};
use std::cmp::Ordering;
use std::collections::HashSet;
use tracing::trace;

/// Extended commit format version
pub const COMMIT_VERSION: u8 = 1;

fn wire_options() -> impl Options + Copy {
    bincode::DefaultOptions::new().with_fixint_encoding()
}

/// Extended Commit Codec
#[derive(Clone, Debug, Default)]
pub struct ExtendedCommitCodec {
    config: ExtendedCommitConfig,
}

impl ExtendedCommitCodec {
    pub fn new(config: ExtendedCommitConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExtendedCommitConfig {
        &self.config
    }

    /// Encode a canonical entry list.
    pub fn encode(&self, entries: &[ExtendedCommitEntry]) -> ExtendedCommitResult<Vec<u8>> {
        self.validate(entries)?;

        let serialized = wire_options()
            .serialize(entries)
            .map_err(|e| ExtendedCommitError::Serialization(e.to_string()))?;

        let size = 1 + serialized.len();
        if size > self.config.max_bytes {
            return Err(ExtendedCommitError::TooLarge {
                size,
                max: self.config.max_bytes,
            });
        }

        let mut bytes = Vec::with_capacity(size);
        bytes.push(COMMIT_VERSION);
        bytes.extend_from_slice(&serialized);

        trace!(entries = entries.len(), bytes = bytes.len(), "Extended commit encoded");
        Ok(bytes)
    }

    /// Decode and structurally validate an entry list.
    pub fn decode(&self, bytes: &[u8]) -> ExtendedCommitResult<Vec<ExtendedCommitEntry>> {
        let Some((&version, body)) = bytes.split_first() else {
            return Err(ExtendedCommitError::Malformed("empty input".to_string()));
        };
        if version != COMMIT_VERSION {
            return Err(ExtendedCommitError::UnsupportedVersion(version));
        }
        if bytes.len() > self.config.max_bytes {
            return Err(ExtendedCommitError::TooLarge {
                size: bytes.len(),
                max: self.config.max_bytes,
            });
        }

        let entries: Vec<ExtendedCommitEntry> = wire_options()
            .with_limit(self.config.max_bytes as u64)
            .deserialize(body)
            .map_err(|e| ExtendedCommitError::Malformed(e.to_string()))?;

        self.validate(&entries)?;
        Ok(entries)
    }

    /// Check the structural rules shared by encode and decode.
    pub fn validate(&self, entries: &[ExtendedCommitEntry]) -> ExtendedCommitResult<()> {
        if entries.len() > self.config.max_entries {
            return Err(ExtendedCommitError::TooManyEntries {
                count: entries.len(),
                max: self.config.max_entries,
            });
        }

        let mut seen: HashSet<ValidatorId> = HashSet::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            self.check_signature_framing(entry)?;

            if !seen.insert(entry.validator) {
                return Err(ExtendedCommitError::DuplicateValidator(entry.validator));
            }
            if index > 0 && canonical_cmp(&entries[index - 1], entry) != Ordering::Less {
                return Err(ExtendedCommitError::NonCanonicalOrder { index });
            }
        }
        Ok(())
    }

    fn check_signature_framing(&self, entry: &ExtendedCommitEntry) -> ExtendedCommitResult<()> {
        if entry.has_extension() {
            if entry.signature.len() != self.config.signature_len {
                return Err(ExtendedCommitError::SignatureLength {
                    validator: entry.validator,
                    expected: self.config.signature_len,
                    found: entry.signature.len(),
                });
            }
        } else if !entry.signature.is_empty() {
            return Err(ExtendedCommitError::UnexpectedSignature(entry.validator));
        }
        Ok(())
    }
}

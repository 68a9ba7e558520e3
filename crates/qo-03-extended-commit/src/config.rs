//! Configuration for the Extended Commit codec

use serde::{Deserialize, Serialize};

/// Extended commit configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExtendedCommitConfig {
    /// Largest accepted validator set
    pub max_entries: usize,
    /// Exact signature length for entries carrying an extension
    pub signature_len: usize,
    /// Ceiling on the encoded commit, bounds decode allocations
    pub max_bytes: usize,
}

impl Default for ExtendedCommitConfig {
    fn default() -> Self {
        Self {
            max_entries: 1_000,
            // ed25519
            signature_len: 64,
            max_bytes: 16 * 1024 * 1024,
        }
    }
}

//! Configuration for the Vote Extension codec

use serde::{Deserialize, Serialize};

/// Vote extension configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VoteExtensionConfig {
    /// Ceiling on the wire frame, header included. Encode truncates until
    /// the compressed frame fits; decode also refuses to inflate past it.
    pub max_bytes: usize,
    /// Zstd level (1-22). 1-3 = fast
    pub compression_level: i32,
}

impl Default for VoteExtensionConfig {
    fn default() -> Self {
        Self {
            max_bytes: 64 * 1024,
            compression_level: 3,
        }
    }
}

impl VoteExtensionConfig {
    /// Create config for testing (small ceiling, fast compression)
    #[cfg(test)]
    pub fn for_testing(max_bytes: usize) -> Self {
        Self {
            max_bytes,
            compression_level: 1,
        }
    }
}

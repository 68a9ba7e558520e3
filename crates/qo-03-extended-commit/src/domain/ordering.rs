//! Canonical entry order
//!
//! Voting power descending, ties broken by validator identity ascending.
//! The order is part of the protocol: every node must encode the same
//! validator set to the same bytes.

use shared_types::ExtendedCommitEntry;
use std::cmp::Ordering;

/// Canonical comparison of two entries
pub fn canonical_cmp(a: &ExtendedCommitEntry, b: &ExtendedCommitEntry) -> Ordering {
    b.voting_power
        .cmp(&a.voting_power)
        .then_with(|| a.validator.cmp(&b.validator))
}

/// Sort entries into canonical order
pub fn sort_canonical(entries: &mut [ExtendedCommitEntry]) {
    entries.sort_by(canonical_cmp);
}

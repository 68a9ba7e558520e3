//! Domain module for the Extended Commit codec

pub mod errors;
pub mod ordering;

pub use errors::*;
pub use ordering::{canonical_cmp, sort_canonical};

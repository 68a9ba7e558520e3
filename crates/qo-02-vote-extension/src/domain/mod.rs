//! Domain module for the Vote Extension codec

pub mod errors;
pub mod payload;

pub use errors::*;
pub use payload::*;

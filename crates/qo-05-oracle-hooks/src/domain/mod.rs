//! Domain module for the Oracle Hooks

pub mod entities;
pub mod errors;
pub mod proposal;
pub mod requests;

pub use entities::*;
pub use errors::*;
pub use proposal::OracleProposal;
pub use requests::*;

//! Core entities for Price Aggregation

use shared_types::{LocalPriceSet, ValidatorId};

/// One validator's decoded contribution to a block
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidatorReport {
    pub validator: ValidatorId,
    pub voting_power: u64,
    /// `None` when the validator's extension failed to decode; it still
    /// counts toward total voting power
    pub prices: Option<LocalPriceSet>,
}

impl ValidatorReport {
    pub fn decoded(validator: ValidatorId, voting_power: u64, prices: LocalPriceSet) -> Self {
        Self {
            validator,
            voting_power,
            prices: Some(prices),
        }
    }

    pub fn invalid(validator: ValidatorId, voting_power: u64) -> Self {
        Self {
            validator,
            voting_power,
            prices: None,
        }
    }
}

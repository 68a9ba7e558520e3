//! # Core Oracle Entities
//!
//! - **Price sets**: [`LocalPriceSet`] (one validator's observation for one
//!   block) and [`CanonicalPriceSet`] (the per-block aggregate).
//! - **Extended commit**: [`ExtendedCommitEntry`], one validator's signed
//!   vote extension as delivered by the consensus engine.
//!
//! Both price sets are backed by `BTreeMap`, so iteration is always in
//! [`AssetPair`] lexical order.

use crate::pair::AssetPair;
use crate::price::Price;
use crate::validator::ValidatorId;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, Bytes};
use sha2::{Digest, Sha256};
use std::collections::btree_map;
use std::collections::BTreeMap;

macro_rules! price_set {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
        pub struct $name(BTreeMap<AssetPair, Price>);

        impl $name {
            pub fn new() -> Self {
                Self(BTreeMap::new())
            }

            /// Insert a price, returning the previous one for the pair.
            pub fn insert(&mut self, pair: AssetPair, price: Price) -> Option<Price> {
                self.0.insert(pair, price)
            }

            pub fn get(&self, pair: &AssetPair) -> Option<&Price> {
                self.0.get(pair)
            }

            pub fn contains(&self, pair: &AssetPair) -> bool {
                self.0.contains_key(pair)
            }

            pub fn remove(&mut self, pair: &AssetPair) -> Option<Price> {
                self.0.remove(pair)
            }

            pub fn len(&self) -> usize {
                self.0.len()
            }

            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }

            /// Entries in pair lexical order.
            pub fn iter(&self) -> btree_map::Iter<'_, AssetPair, Price> {
                self.0.iter()
            }

            pub fn pairs(&self) -> impl Iterator<Item = &AssetPair> {
                self.0.keys()
            }
        }

        impl FromIterator<(AssetPair, Price)> for $name {
            fn from_iter<I: IntoIterator<Item = (AssetPair, Price)>>(iter: I) -> Self {
                Self(iter.into_iter().collect())
            }
        }

        impl IntoIterator for $name {
            type Item = (AssetPair, Price);
            type IntoIter = btree_map::IntoIter<AssetPair, Price>;

            fn into_iter(self) -> Self::IntoIter {
                self.0.into_iter()
            }
        }

        impl<'a> IntoIterator for &'a $name {
            type Item = (&'a AssetPair, &'a Price);
            type IntoIter = btree_map::Iter<'a, AssetPair, Price>;

            fn into_iter(self) -> Self::IntoIter {
                self.0.iter()
            }
        }
    };
}

price_set!(
    /// Prices one validator observed for one block-extension cycle.
    LocalPriceSet
);

price_set!(
    /// Canonical per-block prices produced by stake-weighted aggregation.
    CanonicalPriceSet
);

impl CanonicalPriceSet {
    /// SHA-256 over `(base, quote, price)` in pair order.
    ///
    /// Two nodes holding equal sets always compute the same digest; used to
    /// compare aggregation results in logs without dumping every price.
    pub fn digest(&self) -> [u8; 32] {
        let mut hasher = Sha256::new();
        for (pair, price) in self.iter() {
            hasher.update((pair.base.len() as u32).to_be_bytes());
            hasher.update(pair.base.as_bytes());
            hasher.update((pair.quote.len() as u32).to_be_bytes());
            hasher.update(pair.quote.as_bytes());
            hasher.update(price.to_be_bytes());
        }
        hasher.finalize().into()
    }
}

/// One validator's contribution to a block's extended commit.
///
/// Identity and voting power are supplied by the consensus engine; the
/// extension bytes are opaque at this layer.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtendedCommitEntry {
    pub validator: ValidatorId,
    pub voting_power: u64,
    #[serde_as(as = "Bytes")]
    pub vote_extension: Vec<u8>,
    #[serde_as(as = "Bytes")]
    pub signature: Vec<u8>,
}

impl ExtendedCommitEntry {
    pub fn new(
        validator: ValidatorId,
        voting_power: u64,
        vote_extension: Vec<u8>,
        signature: Vec<u8>,
    ) -> Self {
        Self {
            validator,
            voting_power,
            vote_extension,
            signature,
        }
    }

    /// Entry for a validator that cast no price vote.
    pub fn absent(validator: ValidatorId, voting_power: u64) -> Self {
        Self::new(validator, voting_power, Vec::new(), Vec::new())
    }

    pub fn has_extension(&self) -> bool {
        !self.vote_extension.is_empty()
    }
}

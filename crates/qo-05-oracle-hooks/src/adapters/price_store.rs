//! In-memory chain-state price store

use crate::domain::entities::{PriceUpdate, QuotePrice};
use crate::domain::errors::PriceStoreError;
use crate::ports::outbound::PriceStore;
use parking_lot::RwLock;
use shared_types::AssetPair;
use std::collections::BTreeMap;

#[derive(Debug, Default)]
struct StoreState {
    prices: BTreeMap<AssetPair, QuotePrice>,
    last_height: Option<u64>,
}

/// `PriceStore` backed by a `BTreeMap` behind a `RwLock`
#[derive(Debug, Default)]
pub struct InMemoryPriceStore {
    state: RwLock<StoreState>,
}

impl InMemoryPriceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All current prices in pair order
    pub fn all_prices(&self) -> Vec<(AssetPair, QuotePrice)> {
        self.state
            .read()
            .prices
            .iter()
            .map(|(pair, price)| (pair.clone(), *price))
            .collect()
    }
}

impl PriceStore for InMemoryPriceStore {
    fn get_price(&self, pair: &AssetPair) -> Option<QuotePrice> {
        self.state.read().prices.get(pair).copied()
    }

    fn write_block_prices(
        &self,
        height: u64,
        updates: &[PriceUpdate],
    ) -> Result<(), PriceStoreError> {
        let mut state = self.state.write();
        if let Some(last) = state.last_height {
            if height <= last {
                return Err(PriceStoreError::HeightAlreadyWritten { height, last });
            }
        }

        for update in updates {
            let nonce = state
                .prices
                .get(&update.pair)
                .map(|existing| existing.nonce + 1)
                .unwrap_or(1);
            state.prices.insert(
                update.pair.clone(),
                QuotePrice {
                    price: update.price,
                    decimals: update.decimals,
                    block_height: height,
                    nonce,
                },
            );
        }
        state.last_height = Some(height);
        Ok(())
    }

    fn last_height(&self) -> Option<u64> {
        self.state.read().last_height
    }
}

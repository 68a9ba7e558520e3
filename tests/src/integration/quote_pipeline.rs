//! # Quote Pipeline Integration Tests
//!
//! Venue clients push quotes over an mpsc channel into the ingestion task;
//! the hooks evaluate whatever the store holds when `extend_vote` runs.

#[cfg(test)]
mod tests {
    use crate::integration::network::{block_time, init_tracing, oracle_config, REGISTRY_JSON};
    use qo_01_price_evaluation::{spawn_quote_ingestion, AssetRegistry, QuoteStore};
    use qo_02_vote_extension::{VoteExtensionCodec, VoteExtensionConfig};
    use qo_05_oracle_hooks::{
        Ed25519Verifier, ExtendVoteRequest, InMemoryPriceStore, OracleHooks,
    };
    use shared_types::{AssetPair, Price, RawQuote};
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::{mpsc, watch};

    fn hooks(quotes: &QuoteStore) -> OracleHooks {
        OracleHooks::new(
            oracle_config(1),
            AssetRegistry::from_json(REGISTRY_JSON).unwrap(),
            Arc::new(quotes.clone()),
            Arc::new(Ed25519Verifier),
            Arc::new(InMemoryPriceStore::new()),
        )
        .unwrap()
    }

    fn quote(venue: &str, symbol: &str, price: &str, observed_at: u64) -> RawQuote {
        RawQuote::new(venue, symbol, price.parse().unwrap(), observed_at)
    }

    fn extend(hooks: &OracleHooks, height: u64) -> Vec<u8> {
        hooks
            .extend_vote(&ExtendVoteRequest {
                height,
                round: 0,
                block_time: block_time(height),
                deadline: None,
            })
            .vote_extension
    }

    #[tokio::test]
    async fn test_ingested_quotes_reach_vote_extension() {
        init_tracing();
        let store = QuoteStore::new();
        let hooks = hooks(&store);
        let (tx, rx) = mpsc::channel(16);
        let (_shutdown_tx, shutdown_rx) = watch::channel(false);
        let ingestion = spawn_quote_ingestion(store.clone(), rx, shutdown_rx);

        tx.send(quote("kraken", "XBTUSD", "64000", block_time(1)))
            .await
            .unwrap();
        tx.send(quote("coinbase", "BTC-USD", "64100", block_time(1)))
            .await
            .unwrap();
        // Older than the stored kraken quote; ignored
        tx.send(quote("kraken", "XBTUSD", "1", block_time(1) - 1))
            .await
            .unwrap();
        drop(tx);
        assert_eq!(ingestion.await.unwrap(), 2);

        let bytes = extend(&hooks, 1);
        let prices = VoteExtensionCodec::with_zstd(VoteExtensionConfig::default())
            .decode(&bytes)
            .unwrap();

        let btc: AssetPair = "BTC/USD".parse().unwrap();
        assert_eq!(prices.len(), 1);
        assert_eq!(prices.get(&btc), Some(&Price::from(6_405_000u64)));
    }

    #[tokio::test]
    async fn test_stale_store_abstains() {
        let store = QuoteStore::new();
        let hooks = hooks(&store);
        store.record(quote("kraken", "XBTUSD", "64000", block_time(1)));

        assert!(!extend(&hooks, 1).is_empty());
        // Two minutes later nothing is fresh
        assert!(extend(&hooks, 25).is_empty());
    }

    #[tokio::test]
    async fn test_ingestion_shutdown_while_feeding() {
        init_tracing();
        let store = QuoteStore::new();
        let (tx, rx) = mpsc::channel(16);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let ingestion = spawn_quote_ingestion(store.clone(), rx, shutdown_rx);

        tx.send(quote("kraken", "XBTUSD", "64000", block_time(1)))
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(20)).await;
        shutdown_tx.send(true).unwrap();

        let accepted = tokio::time::timeout(Duration::from_secs(5), ingestion)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(accepted, 1);
        assert!(!extend(&hooks(&store), 1).is_empty());
    }
}

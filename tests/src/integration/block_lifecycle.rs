//! # Block Lifecycle Integration Tests
//!
//! Drives a simulated validator set through extend → verify → prepare →
//! process → finalize and checks every node converges on the same prices.
//!
//! ## Flow Tested
//!
//! ```text
//! height H:   quotes ──→ qo-01 evaluate ──→ qo-02 encode ──→ signed extension
//! height H+1: qo-03 commit + qo-04 aggregate ──→ oracle tx ──→ every node
//!             recomputes ──→ PriceStore
//! ```

use super::network::{block_time, Network};
use shared_types::{AssetPair, Price};

fn pair(s: &str) -> AssetPair {
    s.parse().unwrap()
}

/// Each node sees its own BTC quote for the extension at `height`.
fn feed_btc(network: &Network, prices: &[&str], height: u64) {
    for (node, price) in network.nodes.iter().zip(prices) {
        node.feed("kraken", "XBTUSD", price, block_time(height));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::integration::network::{init_tracing, MAX_TX_BYTES};
    use proptest::prelude::*;
    use qo_03_extended_commit::ExtendedCommitCodec;
    use qo_04_price_aggregation::{StakeWeightedAggregator, ValidatorReport};
    use qo_05_oracle_hooks::{OracleProposal, PriceStore, ProposalRejection, ProposalStatus};
    use shared_types::LocalPriceSet;

    #[test]
    fn test_no_oracle_tx_before_enable_height() {
        init_tracing();
        let network = Network::new(&[10, 10, 10], 2);
        network.feed_all("kraken", "XBTUSD", "100", block_time(1));

        let outcome = network.run_block(0, 2, vec![b"transfer".to_vec()]);

        assert_eq!(outcome.txs, vec![b"transfer".to_vec()]);
        assert!(outcome.accepted_by_all());
        assert!(outcome.agreed_prices().is_empty());
        assert!(network.nodes[0].store.last_height().is_none());
    }

    #[test]
    fn test_validators_converge_on_weighted_median() {
        init_tracing();
        let network = Network::new(&[10, 10, 10, 10], 2);
        feed_btc(&network, &["100", "101", "102", "200"], 2);
        network.feed_all("kraken", "ETHUSD", "2000", block_time(2));

        let outcome = network.run_block(1, 3, vec![b"transfer".to_vec()]);
        assert!(outcome.accepted_by_all());
        assert!(OracleProposal::is_oracle_tx(&outcome.txs[0]));
        assert_eq!(outcome.txs[1], b"transfer".to_vec());

        // Exactly half the power at 101.00 and below: midpoint with 102.00
        let prices = outcome.agreed_prices();
        assert_eq!(prices.get(&pair("BTC/USD")), Some(&Price::from(10_150u64)));
        assert_eq!(
            prices.get(&pair("ETH/USD")),
            Some(&Price::from(20_000_000u64))
        );

        for node in &network.nodes {
            let btc = node.store.get_price(&pair("BTC/USD")).unwrap();
            assert_eq!(btc.price, Price::from(10_150u64));
            assert_eq!(btc.decimals, 2);
            assert_eq!(btc.block_height, 3);
            assert_eq!(btc.nonce, 1);
        }
    }

    #[test]
    fn test_normalized_venue_feeds_cross_pair() {
        init_tracing();
        let network = Network::new(&[10, 10, 10], 1);
        network.feed_all("kraken", "XBTUSD", "50000", block_time(1));
        network.feed_all("binance", "ETHBTC", "0.05", block_time(1));

        let outcome = network.run_block(0, 2, Vec::new());

        assert!(outcome.accepted_by_all());
        assert_eq!(
            outcome.agreed_prices().get(&pair("ETH/USD")),
            Some(&Price::from(25_000_000u64))
        );
    }

    #[test]
    fn test_disabled_pair_is_never_finalized() {
        let network = Network::new(&[10, 10, 10], 1);
        network.feed_all("kraken", "XBTUSD", "100", block_time(1));
        network.feed_all("kraken", "USDTUSD", "1.0001", block_time(1));

        let outcome = network.run_block(0, 2, Vec::new());

        assert!(!outcome.agreed_prices().contains(&pair("USDT/USD")));
        assert!(network.nodes[0].store.get_price(&pair("USDT/USD")).is_none());
    }

    #[test]
    fn test_two_thirds_stake_is_enough() {
        init_tracing();
        let network = Network::new(&[10, 10, 10], 1);
        // Third validator has no venue data and abstains
        feed_btc(&network, &["100", "100"], 1);

        let outcome = network.run_block(2, 2, Vec::new());

        assert!(outcome.accepted_by_all());
        assert_eq!(
            outcome.agreed_prices().get(&pair("BTC/USD")),
            Some(&Price::from(10_000u64))
        );
    }

    #[test]
    fn test_below_threshold_keeps_previous_price() {
        init_tracing();
        let network = Network::new(&[10, 10, 11], 1);
        feed_btc(&network, &["100", "100", "100"], 1);
        let first = network.run_block(0, 2, Vec::new());
        assert_eq!(
            first.agreed_prices().get(&pair("BTC/USD")),
            Some(&Price::from(10_000u64))
        );

        // Validator 3's quote goes stale: 20 of 31 power report, below 2/3
        feed_btc(&network, &["150", "150"], 29);
        let second = network.run_block(1, 30, Vec::new());

        assert!(second.accepted_by_all());
        assert!(second.agreed_prices().is_empty());
        for node in &network.nodes {
            let btc = node.store.get_price(&pair("BTC/USD")).unwrap();
            assert_eq!(btc.price, Price::from(10_000u64));
            assert_eq!(btc.block_height, 2);
            assert_eq!(node.store.last_height(), Some(30));
        }
    }

    #[test]
    fn test_price_history_across_blocks() {
        let network = Network::new(&[5, 7, 9], 1);

        for (height, btc) in [(2u64, "100"), (3, "101.5"), (4, "99.25")] {
            network.feed_all("kraken", "XBTUSD", btc, block_time(height - 1));
            let outcome = network.run_block(height as usize % 3, height, Vec::new());
            assert!(outcome.accepted_by_all(), "block {height} rejected");
        }

        for node in &network.nodes {
            let btc = node.store.get_price(&pair("BTC/USD")).unwrap();
            assert_eq!(btc.price, Price::from(9_925u64));
            assert_eq!(btc.block_height, 4);
            assert_eq!(btc.nonce, 3);
        }
    }

    #[test]
    fn test_any_proposer_builds_the_same_oracle_tx() {
        let network = Network::new(&[10, 20, 30], 1);
        feed_btc(&network, &["100", "110", "120"], 1);
        let commit = network.collect_commit(1, 0);

        let txs: Vec<Vec<u8>> = (0..3)
            .map(|proposer| network.propose(proposer, 2, commit.clone(), Vec::new())[0].clone())
            .collect();

        assert_eq!(txs[0], txs[1]);
        assert_eq!(txs[1], txs[2]);
    }

    #[test]
    fn test_tampered_prices_rejected_by_every_node() {
        init_tracing();
        let network = Network::new(&[10, 10, 10], 1);
        feed_btc(&network, &["100", "100", "100"], 1);
        let commit = network.collect_commit(1, 0);
        let mut txs = network.propose(0, 2, commit, Vec::new());

        let mut proposal = OracleProposal::decode(&txs[0], MAX_TX_BYTES).unwrap();
        proposal
            .prices
            .insert(pair("BTC/USD"), Price::from(1_000_000u64));
        txs[0] = proposal.encode().unwrap();

        let outcome = network.decide(2, txs);

        assert!(outcome
            .statuses
            .iter()
            .all(|s| *s == ProposalStatus::Reject(ProposalRejection::PriceMismatch)));
        assert!(outcome.finalized.is_empty());
        assert!(network.nodes[1].store.get_price(&pair("BTC/USD")).is_none());
    }

    #[test]
    fn test_forged_signature_rejected_by_every_node() {
        let network = Network::new(&[10, 10, 10], 1);
        feed_btc(&network, &["100", "100", "300"], 1);
        let commit = network.collect_commit(1, 0);
        let mut txs = network.propose(0, 2, commit, Vec::new());

        // Proposer replaces one validator's signature
        let codec = ExtendedCommitCodec::default();
        let mut proposal = OracleProposal::decode(&txs[0], MAX_TX_BYTES).unwrap();
        let mut entries = codec.decode(&proposal.extended_commit).unwrap();
        let victim = entries.iter_mut().find(|e| e.has_extension()).unwrap();
        victim.signature = vec![0u8; 64];
        proposal.extended_commit = codec.encode(&entries).unwrap();
        txs[0] = proposal.encode().unwrap();

        let outcome = network.decide(2, txs);

        assert!(outcome
            .statuses
            .iter()
            .all(|s| *s == ProposalStatus::Reject(ProposalRejection::InvalidSignature)));
    }

    #[test]
    fn test_garbage_extension_pruned_by_proposer() {
        init_tracing();
        let network = Network::new(&[10, 10, 10, 10], 1);
        feed_btc(&network, &["100", "100", "100"], 1);

        // Validator 4 signs bytes that do not decode; its peers would reject
        // it, but the proposer's local commit still carries it.
        let mut commit = network.collect_commit(1, 0);
        let garbage = network.nodes[3].sign(1, 0, b"not an extension".to_vec());
        assert!(!network.all_accept(&garbage, 1, 0));
        commit[3] = garbage;

        let outcome = network.decide(2, network.propose(0, 2, commit, Vec::new()));

        assert!(outcome.accepted_by_all());
        assert_eq!(
            outcome.agreed_prices().get(&pair("BTC/USD")),
            Some(&Price::from(10_000u64))
        );
    }

    #[test]
    fn test_mempool_oracle_tx_is_not_smuggled() {
        let network = Network::new(&[10, 10, 10], 1);
        feed_btc(&network, &["100", "100", "100"], 1);
        let commit = network.collect_commit(1, 0);
        let forged = network.propose(1, 2, commit.clone(), Vec::new())[0].clone();

        let txs = network.propose(0, 2, commit, vec![forged, b"transfer".to_vec()]);

        assert_eq!(txs.len(), 2);
        assert_eq!(txs[1], b"transfer".to_vec());
        assert!(network.decide(2, txs).accepted_by_all());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        /// Whatever each validator observes, every node accepts the honest
        /// proposal and finalizes exactly the direct aggregation.
        #[test]
        fn prop_network_matches_direct_aggregation(
            votes in prop::collection::vec((1u64..1_000_000, 1u64..100), 1..7)
        ) {
            let powers: Vec<u64> = votes.iter().map(|(_, power)| *power).collect();
            let network = Network::new(&powers, 1);
            for (node, (btc, _)) in network.nodes.iter().zip(&votes) {
                node.feed("kraken", "XBTUSD", &btc.to_string(), block_time(1));
            }

            let reports: Vec<ValidatorReport> = network
                .nodes
                .iter()
                .zip(&votes)
                .map(|(node, (btc, power))| {
                    let mut prices = LocalPriceSet::new();
                    prices.insert(pair("BTC/USD"), Price::from(btc * 100));
                    ValidatorReport::decoded(node.signer.validator_id(), *power, prices)
                })
                .collect();
            let expected = StakeWeightedAggregator::default().aggregate(&reports);

            let outcome = network.run_block(0, 2, Vec::new());

            prop_assert!(outcome.accepted_by_all());
            prop_assert_eq!(outcome.agreed_prices(), &expected);
        }
    }
}

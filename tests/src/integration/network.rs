//! # Simulated Validator Set
//!
//! Every validator runs its own quote store, price store and `OracleHooks`.
//! The harness plays the consensus engine: it collects signed extensions at
//! height H, lets a proposer build block H+1 and drives every node through
//! process and finalize.

use qo_01_price_evaluation::{AssetRegistry, QuoteStore};
use qo_05_oracle_hooks::{
    extension_sign_bytes, Ed25519Signer, Ed25519Verifier, ExtendVoteRequest, FinalizeBlockRequest,
    InMemoryPriceStore, OracleConfig, OracleHooks, PrepareProposalRequest, ProcessProposalRequest,
    ProposalStatus, VerifyStatus, VerifyVoteExtensionRequest,
};
use shared_types::{CanonicalPriceSet, ExtendedCommitEntry, RawQuote};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

pub const CHAIN_ID: &str = "quantum-oracle-itest";

/// Block time of height 1; each height adds [`BLOCK_INTERVAL_SECS`].
pub const GENESIS_TIME: u64 = 1_700_000_000;
pub const BLOCK_INTERVAL_SECS: u64 = 5;

/// Proposal byte budget used by the harness
pub const MAX_TX_BYTES: usize = 1024 * 1024;

/// Registry shared by every node: BTC/USD from two venues, ETH/USD priced
/// directly and through ETH/BTC normalized by BTC/USD, and a disabled
/// USDT/USD.
pub const REGISTRY_JSON: &str = r#"[
    {"pair": {"base": "BTC", "quote": "USD"}, "decimals": 2, "min_provider_count": 1,
     "venues": [{"venue_name": "kraken", "venue_symbol": "XBTUSD"},
                {"venue_name": "coinbase", "venue_symbol": "BTC-USD"}]},
    {"pair": {"base": "ETH", "quote": "USD"}, "decimals": 4, "min_provider_count": 1,
     "venues": [{"venue_name": "kraken", "venue_symbol": "ETHUSD"},
                {"venue_name": "binance", "venue_symbol": "ETHBTC",
                 "normalize_by_pair": {"base": "BTC", "quote": "USD"}}]},
    {"pair": {"base": "USDT", "quote": "USD"}, "decimals": 6, "min_provider_count": 1,
     "enabled": false,
     "venues": [{"venue_name": "kraken", "venue_symbol": "USDTUSD"}]}
]"#;

/// Install a test-writer subscriber once per process. `RUST_LOG` selects
/// the level.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn block_time(height: u64) -> u64 {
    GENESIS_TIME + height.saturating_sub(1) * BLOCK_INTERVAL_SECS
}

pub fn oracle_config(enable_height: u64) -> OracleConfig {
    OracleConfig {
        chain_id: CHAIN_ID.to_string(),
        vote_extensions_enable_height: enable_height,
        ..Default::default()
    }
}

/// One validator process
pub struct ValidatorNode {
    pub signer: Ed25519Signer,
    pub power: u64,
    pub quotes: QuoteStore,
    pub store: Arc<InMemoryPriceStore>,
    pub hooks: OracleHooks,
}

impl ValidatorNode {
    pub fn new(seed: u8, power: u64, config: OracleConfig, registry: AssetRegistry) -> Self {
        let quotes = QuoteStore::new();
        let store = Arc::new(InMemoryPriceStore::new());
        let hooks = OracleHooks::new(
            config,
            registry,
            Arc::new(quotes.clone()),
            Arc::new(Ed25519Verifier),
            store.clone(),
        )
        .expect("valid oracle config");

        Self {
            signer: Ed25519Signer::from_seed([seed; 32]),
            power,
            quotes,
            store,
            hooks,
        }
    }

    /// Push a venue quote observed at `observed_at`.
    pub fn feed(&self, venue: &str, symbol: &str, price: &str, observed_at: u64) {
        let price = price.parse().expect("valid decimal literal");
        self.quotes
            .record(RawQuote::new(venue, symbol, price, observed_at));
    }

    /// Produce and sign this node's extension for `height`.
    pub fn extend(&self, height: u64, round: u32) -> ExtendedCommitEntry {
        let vote_extension = self
            .hooks
            .extend_vote(&ExtendVoteRequest {
                height,
                round,
                block_time: block_time(height),
                deadline: None,
            })
            .vote_extension;
        self.sign(height, round, vote_extension)
    }

    /// Sign arbitrary extension bytes as this validator.
    pub fn sign(&self, height: u64, round: u32, vote_extension: Vec<u8>) -> ExtendedCommitEntry {
        let validator = self.signer.validator_id();
        if vote_extension.is_empty() {
            return ExtendedCommitEntry::absent(validator, self.power);
        }
        let signature = self
            .signer
            .sign(&extension_sign_bytes(CHAIN_ID, height, round, &vote_extension));
        ExtendedCommitEntry::new(validator, self.power, vote_extension, signature)
    }
}

/// What one block looked like on every node
#[derive(Debug)]
pub struct BlockOutcome {
    pub txs: Vec<Vec<u8>>,
    pub statuses: Vec<ProposalStatus>,
    pub finalized: Vec<CanonicalPriceSet>,
}

impl BlockOutcome {
    pub fn accepted_by_all(&self) -> bool {
        self.statuses.iter().all(|s| *s == ProposalStatus::Accept)
    }

    /// The finalized set, asserting every node agrees on it.
    pub fn agreed_prices(&self) -> &CanonicalPriceSet {
        let first = &self.finalized[0];
        assert!(
            self.finalized.iter().all(|set| set == first),
            "nodes finalized different price sets"
        );
        first
    }
}

/// A validator set sharing one registry and config
pub struct Network {
    pub nodes: Vec<ValidatorNode>,
}

impl Network {
    pub fn new(powers: &[u64], enable_height: u64) -> Self {
        let nodes = powers
            .iter()
            .enumerate()
            .map(|(i, power)| {
                let registry = AssetRegistry::from_json(REGISTRY_JSON).expect("valid registry");
                ValidatorNode::new(i as u8 + 1, *power, oracle_config(enable_height), registry)
            })
            .collect();
        Self { nodes }
    }

    /// Feed the same quote to every node.
    pub fn feed_all(&self, venue: &str, symbol: &str, price: &str, observed_at: u64) {
        for node in &self.nodes {
            node.feed(venue, symbol, price, observed_at);
        }
    }

    /// Extensions for `height` as the consensus engine would collect them:
    /// an extension some peer rejects is replaced by an absent vote.
    pub fn collect_commit(&self, height: u64, round: u32) -> Vec<ExtendedCommitEntry> {
        self.nodes
            .iter()
            .map(|node| {
                let entry = node.extend(height, round);
                if self.all_accept(&entry, height, round) {
                    entry
                } else {
                    ExtendedCommitEntry::absent(entry.validator, entry.voting_power)
                }
            })
            .collect()
    }

    pub fn all_accept(&self, entry: &ExtendedCommitEntry, height: u64, round: u32) -> bool {
        self.nodes.iter().all(|peer| {
            peer.hooks.verify_vote_extension(&VerifyVoteExtensionRequest {
                validator: entry.validator,
                height,
                round,
                vote_extension: entry.vote_extension.clone(),
            }) == VerifyStatus::Accept
        })
    }

    /// `proposer` builds block `height` from `commit`.
    pub fn propose(
        &self,
        proposer: usize,
        height: u64,
        commit: Vec<ExtendedCommitEntry>,
        mempool: Vec<Vec<u8>>,
    ) -> Vec<Vec<u8>> {
        self.nodes[proposer]
            .hooks
            .prepare_proposal(&PrepareProposalRequest {
                height,
                commit_round: 0,
                local_last_commit: commit,
                txs: mempool,
                max_tx_bytes: MAX_TX_BYTES,
            })
            .expect("proposal assembled")
            .txs
    }

    /// Every node validates `txs`; accepting nodes finalize them.
    pub fn decide(&self, height: u64, txs: Vec<Vec<u8>>) -> BlockOutcome {
        let statuses: Vec<ProposalStatus> = self
            .nodes
            .iter()
            .map(|node| {
                node.hooks.process_proposal(&ProcessProposalRequest {
                    height,
                    txs: txs.clone(),
                })
            })
            .collect();

        let finalized = if statuses.iter().all(|s| *s == ProposalStatus::Accept) {
            self.nodes
                .iter()
                .map(|node| {
                    node.hooks
                        .finalize_block(&FinalizeBlockRequest {
                            height,
                            txs: txs.clone(),
                        })
                        .expect("finalize accepted block")
                        .updated
                })
                .collect()
        } else {
            Vec::new()
        };

        BlockOutcome {
            txs,
            statuses,
            finalized,
        }
    }

    /// Full round: extensions at `height - 1`, proposal and decision at
    /// `height`.
    pub fn run_block(&self, proposer: usize, height: u64, mempool: Vec<Vec<u8>>) -> BlockOutcome {
        let commit = self.collect_commit(height - 1, 0);
        let txs = self.propose(proposer, height, commit, mempool);
        self.decide(height, txs)
    }
}

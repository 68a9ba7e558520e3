//! Oracle Hooks Service
//!
//! The five call sites the consensus engine invokes per block. Each hook
//! composes the evaluation, codec and aggregation subsystems; none of them
//! holds aggregation logic of its own.
//!
//! ## Block Lifecycle
//!
//! ```text
//! height H:   extend_vote ──→ bytes ──→ peers: verify_vote_extension
//! height H+1: prepare_proposal (proposer) ──→ OracleProposal tx at block head
//!             process_proposal (everyone) ──→ recompute + compare
//!             finalize_block   (everyone) ──→ PriceStore write
//! ```

use crate::config::OracleConfig;
use crate::domain::entities::{extension_sign_bytes, PriceUpdate};
use crate::domain::errors::{OracleError, OracleResult};
use crate::domain::proposal::OracleProposal;
use crate::domain::requests::{
    ExtendVoteRequest, ExtendVoteResponse, FinalizeBlockRequest, FinalizeBlockResponse,
    PrepareProposalRequest, PrepareProposalResponse, ProcessProposalRequest, ProposalRejection,
    ProposalStatus, VerifyStatus, VerifyVoteExtensionRequest,
};
use crate::metrics;
use crate::ports::outbound::{ExtensionSignatureVerifier, PriceStore};
use parking_lot::RwLock;
use qo_01_price_evaluation::{AssetRegistry, PriceEvaluator, QuoteSource};
use qo_02_vote_extension::{ExtensionCompressor, VoteExtensionCodec};
use qo_03_extended_commit::{sort_canonical, ExtendedCommitCodec};
use qo_04_price_aggregation::{StakeWeightedAggregator, ValidatorReport};
use shared_types::{CanonicalPriceSet, ExtendedCommitEntry, LocalPriceSet};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Why one validator's extension is unusable
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ExtensionFault {
    Decode,
    DisabledPair,
    Signature,
}

impl ExtensionFault {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Decode => "decode",
            Self::DisabledPair => "disabled_pair",
            Self::Signature => "signature",
        }
    }
}

fn deadline_passed(deadline: Option<Instant>) -> bool {
    deadline.map(|d| Instant::now() >= d).unwrap_or(false)
}

/// Oracle consensus hooks
pub struct OracleHooks {
    config: OracleConfig,
    /// Swapped only between blocks; each hook works on one snapshot
    registry: RwLock<Arc<AssetRegistry>>,
    quotes: Arc<dyn QuoteSource>,
    evaluator: PriceEvaluator,
    vote_extension_codec: VoteExtensionCodec,
    extended_commit_codec: ExtendedCommitCodec,
    aggregator: StakeWeightedAggregator,
    verifier: Arc<dyn ExtensionSignatureVerifier>,
    store: Arc<dyn PriceStore>,
}

impl OracleHooks {
    /// Create hooks with the zstd vote-extension compressor.
    pub fn new(
        config: OracleConfig,
        registry: AssetRegistry,
        quotes: Arc<dyn QuoteSource>,
        verifier: Arc<dyn ExtensionSignatureVerifier>,
        store: Arc<dyn PriceStore>,
    ) -> OracleResult<Self> {
        let aggregator = StakeWeightedAggregator::new(config.aggregation.clone())?;
        let vote_extension_codec = VoteExtensionCodec::with_zstd(config.vote_extension.clone());
        let extended_commit_codec = ExtendedCommitCodec::new(config.extended_commit.clone());
        let evaluator = PriceEvaluator::with_config(config.evaluation.clone());

        info!(
            chain_id = %config.chain_id,
            enable_height = config.vote_extensions_enable_height,
            pairs = registry.len(),
            "Oracle hooks initialized"
        );

        Ok(Self {
            config,
            registry: RwLock::new(Arc::new(registry)),
            quotes,
            evaluator,
            vote_extension_codec,
            extended_commit_codec,
            aggregator,
            verifier,
            store,
        })
    }

    /// Replace the vote-extension compressor. Must match every peer's.
    pub fn with_compressor(mut self, compressor: Arc<dyn ExtensionCompressor>) -> Self {
        self.vote_extension_codec =
            VoteExtensionCodec::new(self.config.vote_extension.clone(), compressor);
        self
    }

    pub fn config(&self) -> &OracleConfig {
        &self.config
    }

    /// Current registry snapshot
    pub fn registry(&self) -> Arc<AssetRegistry> {
        Arc::clone(&self.registry.read())
    }

    /// Install a new registry. Call between blocks only.
    pub fn reload_registry(&self, registry: AssetRegistry) {
        info!(pairs = registry.len(), "Asset registry reloaded");
        *self.registry.write() = Arc::new(registry);
    }

    pub fn price_store(&self) -> &Arc<dyn PriceStore> {
        &self.store
    }

    // =========================================================================
    // PRODUCE-LOCAL-EXTENSION
    // =========================================================================

    /// Evaluate current quotes and encode them as this validator's extension.
    ///
    /// Never fails: any problem, including a missed deadline, yields an empty
    /// extension (abstention).
    pub fn extend_vote(&self, req: &ExtendVoteRequest) -> ExtendVoteResponse {
        if !self.config.extensions_enabled(req.height) {
            return ExtendVoteResponse::default();
        }

        let registry = self.registry();
        let report = self
            .evaluator
            .evaluate_source(&registry, self.quotes.as_ref(), req.block_time);

        if deadline_passed(req.deadline) {
            warn!(
                height = req.height,
                stage = "evaluation",
                "Vote extension deadline exceeded, abstaining"
            );
            return ExtendVoteResponse::default();
        }

        let encoded = match self
            .vote_extension_codec
            .encode_with_priority(&report.prices, &registry.priority_order())
        {
            Ok(encoded) => encoded,
            Err(e) => {
                warn!(height = req.height, error = %e, "Failed to encode vote extension, abstaining");
                return ExtendVoteResponse::default();
            }
        };

        if deadline_passed(req.deadline) {
            warn!(
                height = req.height,
                stage = "encoding",
                "Vote extension deadline exceeded, abstaining"
            );
            return ExtendVoteResponse::default();
        }

        metrics::record_vote_extension_size(encoded.bytes.len());
        info!(
            height = req.height,
            round = req.round,
            pairs = report.prices.len() - encoded.dropped.len(),
            omitted = report.omitted.len(),
            dropped = encoded.dropped.len(),
            bytes = encoded.bytes.len(),
            "Vote extension produced"
        );

        ExtendVoteResponse {
            vote_extension: encoded.bytes,
        }
    }

    // =========================================================================
    // VERIFY-PEER-EXTENSION
    // =========================================================================

    /// Accept a peer's extension only if it decodes and reports enabled
    /// pairs exclusively. Side-effect free.
    pub fn verify_vote_extension(&self, req: &VerifyVoteExtensionRequest) -> VerifyStatus {
        if !self.config.extensions_enabled(req.height) {
            if req.vote_extension.is_empty() {
                return VerifyStatus::Accept;
            }
            debug!(
                validator = %req.validator,
                height = req.height,
                "Rejecting vote extension before enable height"
            );
            metrics::record_vote_extension_rejected("not_enabled");
            return VerifyStatus::Reject;
        }

        match self.check_extension(&self.registry(), &req.vote_extension) {
            Ok(_) => VerifyStatus::Accept,
            Err(fault) => {
                debug!(
                    validator = %req.validator,
                    height = req.height,
                    reason = fault.as_str(),
                    "Rejecting vote extension"
                );
                metrics::record_vote_extension_rejected(fault.as_str());
                VerifyStatus::Reject
            }
        }
    }

    // =========================================================================
    // ASSEMBLE-PROPOSAL
    // =========================================================================

    /// Inject the oracle transaction at the head of the proposal.
    ///
    /// Invalid extensions in the local commit are pruned (extension and
    /// signature cleared) so validators checking the proposal see only
    /// usable votes.
    pub fn prepare_proposal(
        &self,
        req: &PrepareProposalRequest,
    ) -> OracleResult<PrepareProposalResponse> {
        let mempool = req
            .txs
            .iter()
            .filter(|tx| !OracleProposal::is_oracle_tx(tx));

        if !self.config.proposal_carries_prices(req.height) {
            return Ok(PrepareProposalResponse {
                txs: fit_txs(Vec::new(), mempool, req.max_tx_bytes),
            });
        }

        let registry = self.registry();
        let extension_height = req.height - 1;

        let mut entries: Vec<ExtendedCommitEntry> = req.local_last_commit.clone();
        let mut reports = Vec::with_capacity(entries.len());
        let mut pruned = 0usize;
        for entry in &mut entries {
            let prices =
                match self.check_entry(&registry, entry, extension_height, req.commit_round) {
                    Ok(prices) => prices,
                    Err(fault) => {
                        debug!(
                            validator = %entry.validator,
                            height = extension_height,
                            reason = fault.as_str(),
                            "Pruning invalid vote extension"
                        );
                        entry.vote_extension.clear();
                        entry.signature.clear();
                        pruned += 1;
                        LocalPriceSet::new()
                    }
                };
            reports.push(ValidatorReport::decoded(
                entry.validator,
                entry.voting_power,
                prices,
            ));
        }
        sort_canonical(&mut entries);

        let extended_commit = self.extended_commit_codec.encode(&entries)?;
        let prices = self.aggregator.aggregate(&reports);
        let pairs = prices.len();
        let oracle_tx = OracleProposal {
            commit_round: req.commit_round,
            extended_commit,
            prices,
        }
        .encode()?;

        if oracle_tx.len() > req.max_tx_bytes {
            return Err(OracleError::OracleTxTooLarge {
                size: oracle_tx.len(),
                max: req.max_tx_bytes,
            });
        }

        info!(
            height = req.height,
            validators = entries.len(),
            pruned,
            pairs,
            bytes = oracle_tx.len(),
            "Oracle transaction injected"
        );

        Ok(PrepareProposalResponse {
            txs: fit_txs(vec![oracle_tx], mempool, req.max_tx_bytes),
        })
    }

    // =========================================================================
    // VALIDATE-PROPOSAL
    // =========================================================================

    /// Recompute the proposal's prices from its extended commit and require
    /// equality.
    pub fn process_proposal(&self, req: &ProcessProposalRequest) -> ProposalStatus {
        let status = self.check_proposal(req);
        if let ProposalStatus::Reject(reason) = status {
            warn!(
                height = req.height,
                reason = reason.as_str(),
                "Rejecting proposal"
            );
            metrics::record_proposal_rejected(reason.as_str());
        }
        status
    }

    fn check_proposal(&self, req: &ProcessProposalRequest) -> ProposalStatus {
        if !self.config.proposal_carries_prices(req.height) {
            if req.txs.iter().any(|tx| OracleProposal::is_oracle_tx(tx)) {
                return ProposalStatus::Reject(ProposalRejection::UnexpectedOracleTx);
            }
            return ProposalStatus::Accept;
        }

        let Some((first, rest)) = req.txs.split_first() else {
            return ProposalStatus::Reject(ProposalRejection::MissingOracleTx);
        };
        if !OracleProposal::is_oracle_tx(first) {
            return ProposalStatus::Reject(ProposalRejection::MissingOracleTx);
        }
        if rest.iter().any(|tx| OracleProposal::is_oracle_tx(tx)) {
            return ProposalStatus::Reject(ProposalRejection::UnexpectedOracleTx);
        }

        let proposal = match OracleProposal::decode(first, self.max_oracle_tx_bytes()) {
            Ok(proposal) => proposal,
            Err(e) => {
                debug!(height = req.height, error = %e, "Oracle transaction decode failed");
                return ProposalStatus::Reject(ProposalRejection::MalformedOracleTx);
            }
        };

        let recomputed = match self.aggregate_commit(&self.registry(), &proposal, req.height) {
            Ok(prices) => prices,
            Err(reason) => return ProposalStatus::Reject(reason),
        };

        if recomputed != proposal.prices {
            warn!(
                height = req.height,
                proposed = %hex::encode(proposal.prices.digest()),
                recomputed = %hex::encode(recomputed.digest()),
                "Proposed prices differ from recomputed aggregation"
            );
            return ProposalStatus::Reject(ProposalRejection::PriceMismatch);
        }

        debug!(height = req.height, pairs = recomputed.len(), "Oracle proposal accepted");
        ProposalStatus::Accept
    }

    // =========================================================================
    // FINALIZE-BLOCK
    // =========================================================================

    /// Write the block's canonical prices to the price store.
    pub fn finalize_block(&self, req: &FinalizeBlockRequest) -> OracleResult<FinalizeBlockResponse> {
        if !self.config.proposal_carries_prices(req.height) {
            return Ok(FinalizeBlockResponse::default());
        }

        let Some(first) = req
            .txs
            .first()
            .filter(|tx| OracleProposal::is_oracle_tx(tx))
        else {
            return Err(OracleError::MissingOracleTx { height: req.height });
        };
        let proposal = OracleProposal::decode(first, self.max_oracle_tx_bytes())?;

        let registry = self.registry();
        let prices = self
            .aggregate_commit(&registry, &proposal, req.height)
            .map_err(|reason| OracleError::MalformedOracleTx(reason.as_str().to_string()))?;

        let updates: Vec<PriceUpdate> = prices
            .iter()
            .filter_map(|(pair, price)| {
                registry.get(pair).map(|spec| PriceUpdate {
                    pair: pair.clone(),
                    price: *price,
                    decimals: spec.decimals,
                })
            })
            .collect();
        self.store.write_block_prices(req.height, &updates)?;

        metrics::record_pairs_updated(updates.len());
        info!(
            height = req.height,
            pairs = updates.len(),
            digest = %hex::encode(prices.digest()),
            "Oracle prices finalized"
        );

        Ok(FinalizeBlockResponse { updated: prices })
    }

    // =========================================================================
    // HELPERS
    // =========================================================================

    /// Decode an extension and check it reports enabled pairs only.
    fn check_extension(
        &self,
        registry: &AssetRegistry,
        bytes: &[u8],
    ) -> Result<LocalPriceSet, ExtensionFault> {
        let prices = self.vote_extension_codec.decode(bytes).map_err(|e| {
            debug!(error = %e, "Vote extension decode failed");
            ExtensionFault::Decode
        })?;

        if let Some(pair) = prices.pairs().find(|pair| !registry.is_enabled(pair)) {
            debug!(pair = %pair, "Vote extension reports a pair that is not enabled");
            return Err(ExtensionFault::DisabledPair);
        }
        Ok(prices)
    }

    /// Verify an extended-commit entry's signature and extension.
    /// An entry without an extension is a validator that did not vote.
    fn check_entry(
        &self,
        registry: &AssetRegistry,
        entry: &ExtendedCommitEntry,
        height: u64,
        round: u32,
    ) -> Result<LocalPriceSet, ExtensionFault> {
        if !entry.has_extension() {
            return Ok(LocalPriceSet::new());
        }

        let sign_bytes =
            extension_sign_bytes(&self.config.chain_id, height, round, &entry.vote_extension);
        self.verifier
            .verify(&entry.validator, &sign_bytes, &entry.signature)
            .map_err(|e| {
                debug!(validator = %entry.validator, error = %e, "Vote extension signature invalid");
                ExtensionFault::Signature
            })?;

        self.check_extension(registry, &entry.vote_extension)
    }

    /// Decode the proposal's commit, check every entry strictly and
    /// aggregate.
    fn aggregate_commit(
        &self,
        registry: &AssetRegistry,
        proposal: &OracleProposal,
        height: u64,
    ) -> Result<CanonicalPriceSet, ProposalRejection> {
        let entries = self
            .extended_commit_codec
            .decode(&proposal.extended_commit)
            .map_err(|e| {
                debug!(height, error = %e, "Extended commit decode failed");
                ProposalRejection::MalformedCommit
            })?;

        let extension_height = height.saturating_sub(1);
        let mut reports = Vec::with_capacity(entries.len());
        for entry in &entries {
            let prices = self
                .check_entry(registry, entry, extension_height, proposal.commit_round)
                .map_err(|fault| match fault {
                    ExtensionFault::Signature => ProposalRejection::InvalidSignature,
                    ExtensionFault::Decode | ExtensionFault::DisabledPair => {
                        ProposalRejection::InvalidExtension
                    }
                })?;
            reports.push(ValidatorReport::decoded(
                entry.validator,
                entry.voting_power,
                prices,
            ));
        }

        Ok(self.aggregator.aggregate(&reports))
    }

    /// Largest oracle tx an honest proposer can build: a commit at the
    /// codec ceiling and a price for every registered pair.
    fn max_oracle_tx_bytes(&self) -> usize {
        OracleProposal::max_encoded_len(
            self.config.extended_commit.max_bytes,
            self.registry().len(),
        )
    }
}

/// Append mempool transactions after `head` until `max_bytes` is reached.
fn fit_txs<'a>(
    mut head: Vec<Vec<u8>>,
    rest: impl Iterator<Item = &'a Vec<u8>>,
    max_bytes: usize,
) -> Vec<Vec<u8>> {
    let mut used: usize = head.iter().map(Vec::len).sum();
    for tx in rest {
        if used + tx.len() > max_bytes {
            break;
        }
        used += tx.len();
        head.push(tx.clone());
    }
    head
}

//! # Quantum-Chain Oracle Benchmarks
//!
//! Per-block costs on the consensus path:
//!
//! | Subsystem | Operation | Runs |
//! |-----------|-----------|------|
//! | qo-01 Price Evaluation | evaluate registry | once per validator per block |
//! | qo-02 Vote Extension | encode / decode | once / once per peer |
//! | qo-03 Extended Commit | encode / decode | proposer / every validator |
//! | qo-04 Price Aggregation | aggregate | every validator |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use qo_01_price_evaluation::{AssetRegistry, PriceEvaluator, QuoteSnapshot};
use qo_02_vote_extension::{VoteExtensionCodec, VoteExtensionConfig};
use qo_03_extended_commit::{sort_canonical, ExtendedCommitCodec};
use qo_04_price_aggregation::{weighted_median, StakeWeightedAggregator, ValidatorReport};
use shared_types::{
    AssetPair, AssetSpec, ExtendedCommitEntry, LocalPriceSet, Price, RawQuote, ValidatorId,
    VenueBinding,
};
use std::time::Duration;

const NOW: u64 = 1_700_000_000;

fn pair(i: usize) -> AssetPair {
    AssetPair::new(format!("A{i}"), "USD").unwrap()
}

/// Deterministic spread around a base price
fn jitter(seed: u64) -> u64 {
    100_000 + (seed.wrapping_mul(6_364_136_223_846_793_005) >> 48) % 1_000
}

fn price_set(pairs: usize, seed: u64) -> LocalPriceSet {
    (0..pairs)
        .map(|i| (pair(i), Price::from(jitter(seed + i as u64))))
        .collect()
}

fn validator(i: usize) -> ValidatorId {
    let mut bytes = [0u8; 32];
    bytes[..8].copy_from_slice(&(i as u64).to_be_bytes());
    ValidatorId::new(bytes)
}

// ============================================================================
// QO-01: Price Evaluation
// ============================================================================

fn bench_price_evaluation(c: &mut Criterion) {
    let mut group = c.benchmark_group("qo-01-price-evaluation");

    for pairs in [10usize, 100] {
        let specs: Vec<AssetSpec> = (0..pairs)
            .map(|i| {
                let mut spec = AssetSpec::new(pair(i), 8, 2);
                for venue in ["kraken", "coinbase", "binance"] {
                    spec = spec.with_venue(VenueBinding::new(venue, format!("A{i}USD")));
                }
                spec
            })
            .collect();
        let registry = AssetRegistry::load(specs).unwrap();
        let quotes = QuoteSnapshot::from_quotes((0..pairs).flat_map(|i| {
            ["kraken", "coinbase", "binance"]
                .into_iter()
                .enumerate()
                .map(move |(v, venue)| {
                    let price = format!("{}.{:04}", jitter((i * 3 + v) as u64), i);
                    RawQuote::new(venue, format!("A{i}USD"), price.parse().unwrap(), NOW)
                })
        }));
        let evaluator = PriceEvaluator::new();

        group.throughput(Throughput::Elements(pairs as u64));
        group.bench_with_input(BenchmarkId::new("evaluate", pairs), &pairs, |b, _| {
            b.iter(|| black_box(evaluator.evaluate(&registry, &quotes, NOW)))
        });
    }

    group.finish();
}

// ============================================================================
// QO-02: Vote Extension Codec
// ============================================================================

fn bench_vote_extension_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("qo-02-vote-extension");
    let codec = VoteExtensionCodec::with_zstd(VoteExtensionConfig::default());

    for pairs in [10usize, 100, 500] {
        let prices = price_set(pairs, 7);
        let bytes = codec.encode(&prices).unwrap();

        group.throughput(Throughput::Elements(pairs as u64));
        group.bench_with_input(BenchmarkId::new("encode", pairs), &prices, |b, prices| {
            b.iter(|| black_box(codec.encode(prices).unwrap()))
        });
        group.bench_with_input(BenchmarkId::new("decode", pairs), &bytes, |b, bytes| {
            b.iter(|| black_box(codec.decode(bytes).unwrap()))
        });
    }

    // Truncation path: 2000 pairs against a 16 KiB ceiling
    let large = price_set(2_000, 11);
    let priority: Vec<AssetPair> = (0..100).map(pair).collect();
    let small = VoteExtensionCodec::with_zstd(VoteExtensionConfig {
        max_bytes: 16 * 1024,
        ..Default::default()
    });
    group.bench_function("encode_truncated_2000", |b| {
        b.iter(|| black_box(small.encode_with_priority(&large, &priority).unwrap()))
    });

    group.finish();
}

// ============================================================================
// QO-03: Extended Commit Codec
// ============================================================================

fn bench_extended_commit_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("qo-03-extended-commit");
    group.measurement_time(Duration::from_secs(10));
    let codec = ExtendedCommitCodec::default();
    let extension = VoteExtensionCodec::with_zstd(VoteExtensionConfig::default())
        .encode(&price_set(50, 3))
        .unwrap();

    for validators in [10usize, 100, 300] {
        let mut entries: Vec<ExtendedCommitEntry> = (0..validators)
            .map(|i| {
                ExtendedCommitEntry::new(
                    validator(i),
                    1 + (i as u64 % 17),
                    extension.clone(),
                    vec![0xAB; 64],
                )
            })
            .collect();
        sort_canonical(&mut entries);
        let bytes = codec.encode(&entries).unwrap();

        group.throughput(Throughput::Elements(validators as u64));
        group.bench_with_input(BenchmarkId::new("encode", validators), &entries, |b, e| {
            b.iter(|| black_box(codec.encode(e).unwrap()))
        });
        group.bench_with_input(BenchmarkId::new("decode", validators), &bytes, |b, bytes| {
            b.iter(|| black_box(codec.decode(bytes).unwrap()))
        });
    }

    group.finish();
}

// ============================================================================
// QO-04: Price Aggregation
// ============================================================================

fn bench_price_aggregation(c: &mut Criterion) {
    let mut group = c.benchmark_group("qo-04-price-aggregation");
    let aggregator = StakeWeightedAggregator::default();

    for validators in [10usize, 100, 300] {
        let reports: Vec<ValidatorReport> = (0..validators)
            .map(|i| {
                ValidatorReport::decoded(validator(i), 1 + (i as u64 % 17), price_set(50, i as u64))
            })
            .collect();

        group.throughput(Throughput::Elements(validators as u64));
        group.bench_with_input(
            BenchmarkId::new("aggregate_50_pairs", validators),
            &reports,
            |b, reports| b.iter(|| black_box(aggregator.aggregate(reports))),
        );
    }

    let samples: Vec<(Price, u64)> = (0..1_000u64)
        .map(|i| (Price::from(jitter(i)), 1 + i % 13))
        .collect();
    group.bench_function("weighted_median_1000", |b| {
        b.iter(|| black_box(weighted_median(&samples)))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_price_evaluation,
    bench_vote_extension_codec,
    bench_extended_commit_codec,
    bench_price_aggregation,
);

criterion_main!(benches);

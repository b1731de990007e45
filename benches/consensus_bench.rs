//! Criterion benchmarks for u-consensus search.
//!
//! Uses synthetic panels of shuffled expert orderings to measure candidate
//! scoring throughput per method and search mode.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use u_consensus::anneal::AnnealConfig;
use u_consensus::consensus::{ConsensusRunner, EngineConfig, Method, SearchStrategy};
use u_consensus::model::{ExpertJudgment, Item};

// ===========================================================================
// Synthetic panel: `experts` random orderings of `n` items
// ===========================================================================

fn panel(n: usize, experts: usize, seed: u64) -> (Vec<Item>, Vec<ExpertJudgment>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let items: Vec<Item> = (1..=n as i64)
        .map(|id| Item::new(id, format!("item {id}")))
        .collect();
    let judgments = (1..=experts as i64)
        .map(|expert| {
            let mut order: Vec<i64> = items.iter().map(|i| i.id).collect();
            order.shuffle(&mut rng);
            ExpertJudgment::new(expert, format!("expert {expert}"), order)
        })
        .collect();
    (items, judgments)
}

// ===========================================================================
// Benchmarks
// ===========================================================================

fn bench_exhaustive_methods(c: &mut Criterion) {
    let mut group = c.benchmark_group("exhaustive");
    group.sample_size(10);

    for n in [6, 7, 8] {
        let (items, judgments) = panel(n, 5, 42);
        for method in Method::ALL {
            let config = EngineConfig::default();
            group.bench_with_input(
                BenchmarkId::new(method.name(), n),
                &config,
                |b, config| {
                    b.iter(|| {
                        ConsensusRunner::run(
                            black_box(&items),
                            black_box(&judgments),
                            method.name(),
                            config,
                        )
                    })
                },
            );
        }
    }
    group.finish();
}

fn bench_parallel_vs_sequential(c: &mut Criterion) {
    let mut group = c.benchmark_group("parallelism");
    group.sample_size(10);

    let (items, judgments) = panel(8, 7, 7);
    for (label, parallel) in [("parallel", true), ("sequential", false)] {
        let config = EngineConfig::default().with_parallel(parallel);
        group.bench_with_input(BenchmarkId::from_parameter(label), &config, |b, config| {
            b.iter(|| {
                ConsensusRunner::run(
                    black_box(&items),
                    black_box(&judgments),
                    "kemeny-snell",
                    config,
                )
            })
        });
    }
    group.finish();
}

fn bench_annealing(c: &mut Criterion) {
    let mut group = c.benchmark_group("annealing");
    group.sample_size(10);

    for n in [12, 20] {
        let (items, judgments) = panel(n, 5, 3);
        let config = EngineConfig::default()
            .with_strategy(SearchStrategy::Annealing)
            .with_anneal(AnnealConfig::default().with_max_iterations(50_000));
        group.bench_with_input(BenchmarkId::from_parameter(n), &config, |b, config| {
            b.iter(|| {
                ConsensusRunner::run(
                    black_box(&items),
                    black_box(&judgments),
                    "cook-seiford",
                    config,
                )
            })
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_exhaustive_methods,
    bench_parallel_vs_sequential,
    bench_annealing
);
criterion_main!(benches);

//! Engine benchmarks
//!
//! Run with: `cargo bench`
//! Save baseline: `cargo bench -- --save-baseline main`
//! Compare: `cargo bench -- --baseline main`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use edsearch::index::SuffixArray;
use edsearch::query::Neighbourhood;
use edsearch::{Engine, QueryExecutor, SearchConfig, SearchIndex};

/// Deterministic pseudo-random DNA
fn dna(len: usize, seed: u64) -> Vec<u8> {
    let mut state = seed;
    (0..len)
        .map(|_| {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            b"acgt"[(state >> 62) as usize]
        })
        .collect()
}

fn bench_index_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("index_build");
    group.sample_size(10);

    for len in [10_000, 100_000] {
        let text = dna(len, 7);
        group.bench_with_input(BenchmarkId::new("suffix_array", len), &text, |b, text| {
            b.iter(|| SuffixArray::build(black_box(text)))
        });
        group.bench_with_input(BenchmarkId::new("search_index", len), &text, |b, text| {
            b.iter(|| SearchIndex::build(black_box(text), SearchConfig::default()))
        });
    }
    group.finish();
}

fn bench_neighbourhood(c: &mut Criterion) {
    let mut group = c.benchmark_group("neighbourhood");
    for k in 1..=3u32 {
        group.bench_with_input(BenchmarkId::from_parameter(k), &k, |b, &k| {
            b.iter(|| {
                Neighbourhood::new(black_box(b"acgtacgt"), b"acgt", k)
                    .map(|n| n.count())
                    .unwrap_or(0)
            })
        });
    }
    group.finish();
}

fn bench_engines(c: &mut Criterion) {
    let text = dna(50_000, 11);
    let index = SearchIndex::new(&text).expect("Failed to build index");
    let executor = QueryExecutor::new(&index);
    let pattern = &text[20_000..20_012];

    for k in 0..=2u32 {
        let mut group = c.benchmark_group(format!("search_k{}", k));
        group.sample_size(20);
        for engine in Engine::ALL {
            group.bench_function(engine.name(), |b| {
                b.iter(|| executor.search(engine, black_box(pattern), k))
            });
        }
        group.finish();
    }
}

criterion_group!(benches, bench_index_build, bench_neighbourhood, bench_engines);
criterion_main!(benches);

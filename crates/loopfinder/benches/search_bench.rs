//! Criterion benchmarks for the loop search on square lattices.
//! Focus sizes: n×n grids with n in {8, 16, 24}.
//! Results: by default under target/criterion; to store under data/bench, run:
//!   CARGO_TARGET_DIR=data/bench cargo bench -p loopfinder

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use loopfinder::prelude::*;
use rand::{rngs::StdRng, SeedableRng};

fn lattice(n: u64) -> WalkNetwork {
    let mut g = WalkNetwork::new();
    for r in 0..n {
        for c in 0..n {
            g.add_node(
                NodeId(r * n + c),
                Coordinate::new(0.002 * r as f64, 0.002 * c as f64),
            );
        }
    }
    for r in 0..n {
        for c in 0..n {
            if r + 1 < n {
                g.add_edge(NodeId(r * n + c), NodeId((r + 1) * n + c), 221.0)
                    .unwrap();
            }
            if c + 1 < n {
                g.add_edge(NodeId(r * n + c), NodeId(r * n + c + 1), 222.6)
                    .unwrap();
            }
        }
    }
    g
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("loop_search");
    for &n in &[8u64, 16, 24] {
        let g = lattice(n);
        let start = NodeId((n / 2) * n + n / 2);
        let cfg = LoopSearchCfg {
            target_km: 0.2 * n as f64,
            attempts: 100,
            ..LoopSearchCfg::default()
        };
        group.bench_with_input(BenchmarkId::new("find_loops", n), &n, |b, _| {
            b.iter_batched(
                || StdRng::seed_from_u64(43),
                |mut rng| {
                    let _loops = find_loops(&g, start, &cfg, &mut rng).unwrap();
                },
                BatchSize::SmallInput,
            )
        });

        let loops = find_loops(&g, start, &cfg, &mut StdRng::seed_from_u64(44)).unwrap();
        group.bench_with_input(BenchmarkId::new("filter_similar", n), &n, |b, _| {
            b.iter_batched(
                || loops.clone(),
                |ls| {
                    let _kept = filter_similar_loops(ls, 0.8);
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_search);
criterion_main!(benches);

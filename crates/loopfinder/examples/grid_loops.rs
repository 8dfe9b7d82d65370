//! Search loops on a synthetic lattice and print what survives deduplication.
//!
//! Usage:
//!   cargo run -p loopfinder --example grid_loops -- [target_km] [seed]

use loopfinder::prelude::*;
use rand::{rngs::StdRng, SeedableRng};

fn main() {
    let target_km: f64 = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(2.0);
    let seed: u64 = std::env::args()
        .nth(2)
        .and_then(|s| s.parse().ok())
        .unwrap_or(2025);

    let n = 12u64;
    let mut g = WalkNetwork::new();
    for r in 0..n {
        for c in 0..n {
            g.add_node(
                NodeId(r * n + c),
                Coordinate::new(45.0 + 0.002 * r as f64, 7.0 + 0.002 * c as f64),
            );
        }
    }
    for r in 0..n {
        for c in 0..n {
            let here = NodeId(r * n + c);
            for (rr, cc) in [(r + 1, c), (r, c + 1)] {
                if rr < n && cc < n {
                    let there = NodeId(rr * n + cc);
                    let len_m = geodesic_distance_km(
                        g.coordinate(here).unwrap(),
                        g.coordinate(there).unwrap(),
                    ) * 1000.0;
                    g.add_edge(here, there, len_m).unwrap();
                }
            }
        }
    }

    let start = g
        .nearest_node(Coordinate::new(45.011, 7.011))
        .expect("non-empty lattice");
    let cfg = LoopSearchCfg {
        target_km,
        attempts: 500,
        ..LoopSearchCfg::default()
    };
    let mut rng = StdRng::seed_from_u64(seed);
    let report = LoopSampler::new(&g, start, cfg).run(&mut rng).unwrap();
    println!("stats: {:?}", report.stats);
    let loops = filter_similar_loops(report.loops, 0.8);
    for (i, l) in loops.iter().enumerate() {
        println!("loop {}: {:.2} km, {} nodes", i + 1, l.length_km, l.path.len());
    }
}

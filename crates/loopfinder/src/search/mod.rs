//! Randomized loop search: three shortest-path legs through two random waypoints.
//!
//! Model
//! - Each attempt draws two distinct waypoints, joins start→n1→n2→start from
//!   oracle legs, and keeps the closed path if it is not degenerate, does not
//!   backtrack too much, and its geodesic length is within
//!   `target × tolerance` of the target.
//! - State (tried pairs, results, counters) lives in one `LoopSampler::run`;
//!   randomness is injected, so a seeded RNG replays a run exactly.
//!
//! Layout
//! - `types.rs`: config, errors, per-attempt outcomes, stats, cancel flag.
//! - `sampler.rs`: the attempt loop.

mod sampler;
mod types;

pub use sampler::{find_loops, passes_duplicate_check, LoopSampler};
pub use types::{
    AttemptOutcome, CancelFlag, LoopSearchCfg, SearchError, SearchReport, SearchStats,
};

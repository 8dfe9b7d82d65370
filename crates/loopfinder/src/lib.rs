//! Randomized search for closed walking loops on a geographic network.
//!
//! Pipeline
//! - `search`: sample waypoint pairs, close a loop from three shortest-path legs,
//!   keep loops whose geodesic length is within tolerance of the target.
//! - `similarity`: drop later loops that share too many nodes with an earlier one.
//! - `distance`: ellipsoidal geodesic distance and path length (km).
//! - `graph`: the shortest-path contract consumed by the search, plus an
//!   in-memory walking network that implements it.
//!
//! The search never fetches or renders anything; callers hand it a graph and
//! take the loop list away.

pub mod distance;
pub mod graph;
pub mod search;
pub mod similarity;
pub mod types;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use graph::{EdgeWeight, GraphError, PathOutcome, WalkGraph, WalkNetwork};
pub use search::{find_loops, CancelFlag, LoopSampler, LoopSearchCfg, SearchError, SearchReport};
pub use similarity::filter_similar_loops;
pub use types::{AttemptKey, Coordinate, Loop, NodeId};

/// Common exports for callers wiring the full search-and-filter pass.
pub mod prelude {
    pub use crate::distance::{geodesic_distance_km, path_length_km};
    pub use crate::graph::{EdgeWeight, GraphError, PathOutcome, WalkGraph, WalkNetwork};
    pub use crate::search::{
        find_loops, AttemptOutcome, CancelFlag, LoopSampler, LoopSearchCfg, SearchError,
        SearchReport, SearchStats,
    };
    pub use crate::similarity::{filter_similar_loops, jaccard, validate_similarity_threshold};
    pub use crate::types::{AttemptKey, Coordinate, Loop, NodeId};
}

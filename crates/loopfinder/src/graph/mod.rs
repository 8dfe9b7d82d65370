//! Graph-provider contract and an in-memory walking network.
//!
//! Purpose
//! - `WalkGraph` is everything the loop search needs from a graph: the node
//!   set, coordinates, and a shortest-path oracle.
//! - "No path" is an expected outcome at sampling rate, so it is a
//!   `PathOutcome` variant; `GraphError` is reserved for collaborator defects.
//!
//! `WalkNetwork` (in `network.rs`) wraps a petgraph `UnGraph` and is the
//! concrete graph used by the CLI and tests: shortest-path oracle, nearest-node
//! lookup, radius cut.

mod network;

pub use network::WalkNetwork;

use thiserror::Error;

use crate::types::{Coordinate, NodeId};

/// Edge weight used by the shortest-path oracle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EdgeWeight {
    /// Stored edge length in meters.
    #[default]
    Length,
    /// Every edge costs 1.
    Hops,
}

/// Result of a shortest-path query between two known nodes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PathOutcome {
    /// Node sequence from source to target, both inclusive.
    Found(Vec<NodeId>),
    /// Source and target lie in different components.
    NoPath,
}

/// Defects reported by a graph collaborator.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum GraphError {
    #[error("unknown node {0}")]
    UnknownNode(NodeId),
    #[error("edge {from} -> {to} has invalid length {length_m}")]
    InvalidEdgeLength {
        from: NodeId,
        to: NodeId,
        length_m: f64,
    },
    #[error("oracle returned a leg that does not run {from} -> {to}")]
    MalformedPath { from: NodeId, to: NodeId },
}

/// Read-only view of a walking network as consumed by the loop search.
pub trait WalkGraph {
    /// All node ids; sampling draws uniformly from this slice.
    fn node_ids(&self) -> &[NodeId];

    fn coordinate(&self, node: NodeId) -> Option<Coordinate>;

    fn contains(&self, node: NodeId) -> bool {
        self.coordinate(node).is_some()
    }

    /// Shortest path from `from` to `to` under `weight`.
    ///
    /// Unknown endpoints are an error; disconnected endpoints are `NoPath`.
    fn shortest_path(
        &self,
        from: NodeId,
        to: NodeId,
        weight: EdgeWeight,
    ) -> Result<PathOutcome, GraphError>;
}

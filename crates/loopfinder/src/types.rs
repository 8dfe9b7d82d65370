//! Shared value types: node ids, coordinates, loops, attempt keys.

use std::fmt;

/// Opaque vertex identifier (OSM node id space).
///
/// Only equality and hashing carry meaning; the derived `Ord` exists so that
/// `AttemptKey` can store a pair canonically and is not a spatial ordering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Geographic coordinate in degrees (WGS-84).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    #[inline]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// A closed walk from the start node back to itself.
#[derive(Clone, Debug, PartialEq)]
pub struct Loop {
    /// Node sequence; first and last element are the start node.
    pub path: Vec<NodeId>,
    /// Sum of consecutive geodesic distances along `path`, in km.
    pub length_km: f64,
}

impl Loop {
    pub fn start(&self) -> Option<NodeId> {
        self.path.first().copied()
    }
}

/// Unordered waypoint pair; `(a, b)` and `(b, a)` compare and hash equal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AttemptKey(NodeId, NodeId);

impl AttemptKey {
    #[inline]
    pub fn new(a: NodeId, b: NodeId) -> Self {
        if a <= b {
            Self(a, b)
        } else {
            Self(b, a)
        }
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.0 == node || self.1 == node
    }
}

//! Geodesic distances on the WGS-84 ellipsoid.
//!
//! Lengths are reported in kilometers. The underlying solver is Karney's
//! geodesic inverse (via `geo::Geodesic`), which is symmetric and returns
//! exactly zero for coincident points.

use geo::{Distance, Geodesic, Point};

use crate::graph::{GraphError, WalkGraph};
use crate::types::{Coordinate, NodeId};

#[inline]
fn to_point(c: Coordinate) -> Point<f64> {
    // geo points are (x, y) = (lon, lat)
    Point::new(c.lon, c.lat)
}

/// Geodesic distance between two coordinates in km.
pub fn geodesic_distance_km(p1: Coordinate, p2: Coordinate) -> f64 {
    Geodesic::distance(to_point(p1), to_point(p2)) / 1000.0
}

/// Sum of geodesic distances between consecutive nodes of `path`, in km.
///
/// Paths with fewer than two nodes have length 0. A node without a coordinate
/// is a graph defect and is reported, not skipped.
pub fn path_length_km<G: WalkGraph + ?Sized>(graph: &G, path: &[NodeId]) -> Result<f64, GraphError> {
    let mut total = 0.0;
    let mut prev: Option<Coordinate> = None;
    for &node in path {
        let c = graph.coordinate(node).ok_or(GraphError::UnknownNode(node))?;
        if let Some(p) = prev {
            total += geodesic_distance_km(p, c);
        }
        prev = Some(c);
    }
    Ok(total)
}

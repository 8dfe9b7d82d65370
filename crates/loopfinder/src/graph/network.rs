//! petgraph-backed walking network with a shortest-path oracle.

use std::collections::HashMap;

use petgraph::algo::astar;
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;

use super::{EdgeWeight, GraphError, PathOutcome, WalkGraph};
use crate::distance::geodesic_distance_km;
use crate::types::{Coordinate, NodeId};

/// Undirected walking network; edges carry a length in meters.
///
/// Nodes are never removed, so `ids[k]` is the OSM id of `NodeIndex::new(k)`.
#[derive(Clone, Debug, Default)]
pub struct WalkNetwork {
    graph: UnGraph<Coordinate, f64>,
    ids: Vec<NodeId>,
    index: HashMap<NodeId, NodeIndex>,
}

impl WalkNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Insert a node, or move it if the id already exists.
    pub fn add_node(&mut self, id: NodeId, coord: Coordinate) {
        if let Some(&k) = self.index.get(&id) {
            self.graph[k] = coord;
            return;
        }
        let k = self.graph.add_node(coord);
        self.index.insert(id, k);
        self.ids.push(id);
    }

    /// Add an undirected edge of `length_m` meters between two existing nodes.
    pub fn add_edge(&mut self, a: NodeId, b: NodeId, length_m: f64) -> Result<(), GraphError> {
        let ia = self.idx(a)?;
        let ib = self.idx(b)?;
        if !length_m.is_finite() || length_m < 0.0 {
            return Err(GraphError::InvalidEdgeLength {
                from: a,
                to: b,
                length_m,
            });
        }
        self.graph.add_edge(ia, ib, length_m);
        Ok(())
    }

    /// Closest node to `coord` by geodesic distance; `None` on an empty network.
    pub fn nearest_node(&self, coord: Coordinate) -> Option<NodeId> {
        self.graph
            .node_indices()
            .map(|k| (k, geodesic_distance_km(coord, self.graph[k])))
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(k, _)| self.ids[k.index()])
    }

    /// Induced subgraph on the nodes within `radius_km` of `center`.
    pub fn restricted_to_radius(&self, center: Coordinate, radius_km: f64) -> WalkNetwork {
        let keep: Vec<bool> = self
            .graph
            .node_indices()
            .map(|k| geodesic_distance_km(center, self.graph[k]) <= radius_km)
            .collect();
        // filter_map keeps surviving nodes in order and drops edges with a removed end
        let graph = self
            .graph
            .filter_map(|k, &c| keep[k.index()].then_some(c), |_, &len| Some(len));
        let ids: Vec<NodeId> = self
            .ids
            .iter()
            .zip(&keep)
            .filter_map(|(&id, &kept)| kept.then_some(id))
            .collect();
        let index = ids
            .iter()
            .enumerate()
            .map(|(k, &id)| (id, NodeIndex::new(k)))
            .collect();
        WalkNetwork { graph, ids, index }
    }

    fn idx(&self, id: NodeId) -> Result<NodeIndex, GraphError> {
        self.index
            .get(&id)
            .copied()
            .ok_or(GraphError::UnknownNode(id))
    }
}

impl WalkGraph for WalkNetwork {
    fn node_ids(&self) -> &[NodeId] {
        &self.ids
    }

    fn coordinate(&self, node: NodeId) -> Option<Coordinate> {
        self.index.get(&node).map(|&k| self.graph[k])
    }

    fn shortest_path(
        &self,
        from: NodeId,
        to: NodeId,
        weight: EdgeWeight,
    ) -> Result<PathOutcome, GraphError> {
        let s = self.idx(from)?;
        let t = self.idx(to)?;
        // Zero heuristic: A* degenerates to Dijkstra but hands back the path.
        let found = astar(
            &self.graph,
            s,
            |k| k == t,
            |e| match weight {
                EdgeWeight::Length => *e.weight(),
                EdgeWeight::Hops => 1.0,
            },
            |_| 0.0,
        );
        Ok(match found {
            Some((_, path)) => {
                PathOutcome::Found(path.into_iter().map(|k| self.ids[k.index()]).collect())
            }
            None => PathOutcome::NoPath,
        })
    }
}

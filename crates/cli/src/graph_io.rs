//! JSON walking-network export → `WalkNetwork`.
//!
//! Format: `{"nodes": [{"id", "lat", "lon"}], "edges": [{"from", "to", "length_m"}]}`.
//! Edges are undirected.

use anyhow::{Context, Result};
use loopfinder::{Coordinate, NodeId, WalkNetwork};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize, Serialize)]
pub struct GraphFile {
    pub nodes: Vec<NodeRecord>,
    pub edges: Vec<EdgeRecord>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct NodeRecord {
    pub id: u64,
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct EdgeRecord {
    pub from: u64,
    pub to: u64,
    pub length_m: f64,
}

impl GraphFile {
    pub fn into_network(self) -> Result<WalkNetwork> {
        let mut g = WalkNetwork::new();
        for n in self.nodes {
            g.add_node(NodeId(n.id), Coordinate::new(n.lat, n.lon));
        }
        for (k, e) in self.edges.into_iter().enumerate() {
            g.add_edge(NodeId(e.from), NodeId(e.to), e.length_m)
                .with_context(|| format!("edge #{k}"))?;
        }
        Ok(g)
    }
}

pub fn load_graph<P: AsRef<Path>>(path: P) -> Result<WalkNetwork> {
    let path = path.as_ref();
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let file: GraphFile =
        serde_json::from_slice(&bytes).with_context(|| format!("parsing {}", path.display()))?;
    file.into_network()
        .with_context(|| format!("building network from {}", path.display()))
}

//! Loop list handed to external visualizers (`loops.json`).

use anyhow::{Context, Result};
use loopfinder::{Coordinate, Loop, NodeId, WalkGraph};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize, Serialize)]
pub struct LoopsFile {
    /// `[lat, lon]` of the requested start point (not the snapped node).
    pub start: [f64; 2],
    pub start_node: u64,
    pub target_distance_km: f64,
    pub loops: Vec<LoopRecord>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct LoopRecord {
    /// 1-based, matching the "Loop i" labels of a map layer list.
    pub index: usize,
    pub length_km: f64,
    pub nodes: Vec<u64>,
    /// `[lat, lon]` per node, same order as `nodes`.
    pub coordinates: Vec<[f64; 2]>,
}

impl LoopsFile {
    pub fn build<G: WalkGraph + ?Sized>(
        graph: &G,
        start: Coordinate,
        start_node: NodeId,
        target_distance_km: f64,
        loops: &[Loop],
    ) -> Result<Self> {
        let mut records = Vec::with_capacity(loops.len());
        for (i, l) in loops.iter().enumerate() {
            let coordinates = l
                .path
                .iter()
                .map(|&n| {
                    graph
                        .coordinate(n)
                        .map(|c| [c.lat, c.lon])
                        .with_context(|| format!("loop {} references unknown node {n}", i + 1))
                })
                .collect::<Result<Vec<_>>>()?;
            records.push(LoopRecord {
                index: i + 1,
                length_km: l.length_km,
                nodes: l.path.iter().map(|n| n.0).collect(),
                coordinates,
            });
        }
        Ok(Self {
            start: [start.lat, start.lon],
            start_node: start_node.0,
            target_distance_km,
            loops: records,
        })
    }

    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("creating output dir {}", parent.display()))?;
            }
        }
        fs::write(path, serde_json::to_vec_pretty(self)?)
            .with_context(|| format!("writing {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use loopfinder::WalkNetwork;
    use tempfile::tempdir;

    fn triangle() -> WalkNetwork {
        let mut g = WalkNetwork::new();
        g.add_node(NodeId(1), Coordinate::new(0.0, 0.0));
        g.add_node(NodeId(2), Coordinate::new(0.0, 0.01));
        g.add_node(NodeId(3), Coordinate::new(0.01, 0.0));
        g
    }

    #[test]
    fn records_are_one_based_with_coordinates() {
        let g = triangle();
        let loops = vec![Loop {
            path: vec![NodeId(1), NodeId(2), NodeId(3), NodeId(1)],
            length_km: 3.8,
        }];
        let file =
            LoopsFile::build(&g, Coordinate::new(0.0001, 0.0), NodeId(1), 4.0, &loops).unwrap();
        assert_eq!(file.loops.len(), 1);
        assert_eq!(file.loops[0].index, 1);
        assert_eq!(file.loops[0].nodes, vec![1, 2, 3, 1]);
        assert_eq!(file.loops[0].coordinates[1], [0.0, 0.01]);

        let dir = tempdir().unwrap();
        let out = dir.path().join("nested/loops.json");
        file.write(&out).unwrap();
        let back: LoopsFile = serde_json::from_slice(&fs::read(&out).unwrap()).unwrap();
        assert_eq!(back.start_node, 1);
        assert_eq!(back.loops[0].length_km, 3.8);
    }

    #[test]
    fn unknown_node_fails() {
        let g = triangle();
        let loops = vec![Loop {
            path: vec![NodeId(1), NodeId(8), NodeId(1)],
            length_km: 1.0,
        }];
        assert!(LoopsFile::build(&g, Coordinate::new(0.0, 0.0), NodeId(1), 1.0, &loops).is_err());
    }
}

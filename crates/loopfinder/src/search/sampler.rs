//! Attempt loop for the randomized loop search.

use std::collections::HashSet;

use rand::seq::index;
use rand::Rng;

use super::types::{AttemptOutcome, CancelFlag, LoopSearchCfg, SearchError, SearchReport};
use crate::distance::path_length_km;
use crate::graph::{GraphError, PathOutcome, WalkGraph};
use crate::types::{AttemptKey, Loop, NodeId};

/// Search for loops around `start` and return them in discovery order.
///
/// An empty result means nothing fit within the attempt budget; it is not an error.
pub fn find_loops<G, R>(
    graph: &G,
    start: NodeId,
    cfg: &LoopSearchCfg,
    rng: &mut R,
) -> Result<Vec<Loop>, SearchError>
where
    G: WalkGraph + ?Sized,
    R: Rng + ?Sized,
{
    LoopSampler::new(graph, start, *cfg)
        .run(rng)
        .map(|report| report.loops)
}

/// True if the path repeats few enough nodes: `distinct > ratio × total`.
///
/// The comparison is strict, so `distinct == ratio × total` is rejected.
pub fn passes_duplicate_check(path: &[NodeId], max_duplicate_ratio: f64) -> bool {
    let distinct = path.iter().collect::<HashSet<_>>().len();
    distinct as f64 > max_duplicate_ratio * path.len() as f64
}

/// One search run over a fixed graph and start node.
pub struct LoopSampler<'a, G: WalkGraph + ?Sized> {
    graph: &'a G,
    start: NodeId,
    cfg: LoopSearchCfg,
    cancel: Option<CancelFlag>,
}

impl<'a, G: WalkGraph + ?Sized> LoopSampler<'a, G> {
    pub fn new(graph: &'a G, start: NodeId, cfg: LoopSearchCfg) -> Self {
        Self {
            graph,
            start,
            cfg,
            cancel: None,
        }
    }

    pub fn with_cancel(mut self, flag: CancelFlag) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Run the full attempt budget (or until cancelled).
    ///
    /// Fails before sampling on an invalid config or an unknown start node, and
    /// mid-run only if the graph reports a defect.
    pub fn run<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<SearchReport, SearchError> {
        self.cfg.validate()?;
        if !self.graph.contains(self.start) {
            return Err(SearchError::UnknownStart(self.start));
        }
        let nodes = self.graph.node_ids();
        let mut report = SearchReport::default();
        if nodes.len() < 2 {
            tracing::debug!(nodes = nodes.len(), "graph too small to draw two waypoints");
            return Ok(report);
        }

        let mut tried: HashSet<AttemptKey> = HashSet::new();
        for _ in 0..self.cfg.attempts {
            if self.cancel.as_ref().is_some_and(CancelFlag::is_cancelled) {
                report.stats.cancelled = true;
                break;
            }
            let picks = index::sample(rng, nodes.len(), 2);
            let (n1, n2) = (nodes[picks.index(0)], nodes[picks.index(1)]);
            let outcome = self.attempt(n1, n2, &mut tried)?;
            report.stats.record(&outcome);
            if let AttemptOutcome::Accepted(found) = outcome {
                tracing::info!(
                    nodes = found.path.len(),
                    "found a new loop of {:.2} km",
                    found.length_km
                );
                report.loops.push(found);
            }
        }

        let s = &report.stats;
        tracing::info!(
            attempts = s.attempts,
            accepted = s.accepted,
            repeated_pair = s.repeated_pair,
            degenerate_waypoints = s.degenerate_waypoints,
            no_path = s.no_path,
            collinear = s.collinear,
            backtracking = s.backtracking,
            out_of_tolerance = s.out_of_tolerance,
            cancelled = s.cancelled,
            "loop search finished"
        );
        Ok(report)
    }

    /// Evaluate the waypoint pair `(n1, n2)`, recording it in `tried`.
    pub(crate) fn attempt(
        &self,
        n1: NodeId,
        n2: NodeId,
        tried: &mut HashSet<AttemptKey>,
    ) -> Result<AttemptOutcome, SearchError> {
        if !tried.insert(AttemptKey::new(n1, n2)) {
            return Ok(AttemptOutcome::RepeatedPair);
        }
        if n1 == self.start || n2 == self.start || n1 == n2 {
            return Ok(AttemptOutcome::DegenerateWaypoints);
        }

        let Some(leg1) = self.leg(self.start, n1)? else {
            return Ok(AttemptOutcome::NoPath);
        };
        let Some(leg2) = self.leg(n1, n2)? else {
            return Ok(AttemptOutcome::NoPath);
        };
        let Some(leg3) = self.leg(n2, self.start)? else {
            return Ok(AttemptOutcome::NoPath);
        };

        if leg1.contains(&n2) || leg3.contains(&n1) {
            return Ok(AttemptOutcome::Collinear);
        }

        // legs are non-empty and share their junction nodes
        let mut path = Vec::with_capacity(leg1.len() + leg2.len() + leg3.len() - 2);
        path.extend_from_slice(&leg1);
        path.extend_from_slice(&leg2[1..]);
        path.extend_from_slice(&leg3[1..]);

        if !passes_duplicate_check(&path, self.cfg.max_duplicate_ratio) {
            return Ok(AttemptOutcome::Backtracking);
        }

        let length_km = path_length_km(self.graph, &path)?;
        if (length_km - self.cfg.target_km).abs() > self.cfg.target_km * self.cfg.tolerance {
            return Ok(AttemptOutcome::OutOfTolerance { length_km });
        }
        Ok(AttemptOutcome::Accepted(Loop { path, length_km }))
    }

    fn leg(&self, from: NodeId, to: NodeId) -> Result<Option<Vec<NodeId>>, SearchError> {
        match self.graph.shortest_path(from, to, self.cfg.weight)? {
            PathOutcome::NoPath => Ok(None),
            PathOutcome::Found(p) => {
                if p.first() != Some(&from) || p.last() != Some(&to) {
                    return Err(GraphError::MalformedPath { from, to }.into());
                }
                Ok(Some(p))
            }
        }
    }
}

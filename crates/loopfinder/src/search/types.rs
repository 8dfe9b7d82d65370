//! Search configuration, errors, and run bookkeeping.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use thiserror::Error;

use crate::graph::{EdgeWeight, GraphError};
use crate::types::{Loop, NodeId};

/// Loop search parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LoopSearchCfg {
    /// Desired loop length in km; must be finite and > 0.
    pub target_km: f64,
    /// Number of waypoint-pair draws.
    pub attempts: usize,
    /// Allowed relative deviation from `target_km`, in (0, 1].
    pub tolerance: f64,
    /// A loop is kept only if `distinct > max_duplicate_ratio × total` nodes; in [0, 1).
    pub max_duplicate_ratio: f64,
    pub weight: EdgeWeight,
}

impl Default for LoopSearchCfg {
    fn default() -> Self {
        Self {
            target_km: 5.0,
            attempts: 1000,
            tolerance: 0.1,
            max_duplicate_ratio: 0.75,
            weight: EdgeWeight::Length,
        }
    }
}

impl LoopSearchCfg {
    pub fn validate(&self) -> Result<(), SearchError> {
        if !(self.target_km.is_finite() && self.target_km > 0.0) {
            return Err(SearchError::invalid(format!(
                "target distance must be finite and > 0, got {}",
                self.target_km
            )));
        }
        if !(self.tolerance > 0.0 && self.tolerance <= 1.0) {
            return Err(SearchError::invalid(format!(
                "tolerance must lie in (0, 1], got {}",
                self.tolerance
            )));
        }
        if !(self.max_duplicate_ratio >= 0.0 && self.max_duplicate_ratio < 1.0) {
            return Err(SearchError::invalid(format!(
                "duplicate-node threshold must lie in [0, 1), got {}",
                self.max_duplicate_ratio
            )));
        }
        Ok(())
    }

    /// Largest start-to-waypoint distance worth keeping in the graph (km).
    ///
    /// A loop of at most `target × (1 + tolerance)` never strays further than
    /// half its length from the start. Floored to whole meters.
    pub fn search_radius_km(&self) -> f64 {
        let radius_m = self.target_km * (1.0 + self.tolerance) * 1000.0 / 2.0;
        radius_m.floor() / 1000.0
    }

    /// Inclusive acceptance window `[lo, hi]` in km.
    pub fn length_window_km(&self) -> (f64, f64) {
        let slack = self.target_km * self.tolerance;
        (self.target_km - slack, self.target_km + slack)
    }
}

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("invalid search configuration: {reason}")]
    InvalidConfig { reason: String },
    #[error("start node {0} is not in the graph")]
    UnknownStart(NodeId),
    #[error(transparent)]
    Graph(#[from] GraphError),
}

impl SearchError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }
}

/// What happened to a single attempt.
#[derive(Clone, Debug, PartialEq)]
pub enum AttemptOutcome {
    /// The unordered waypoint pair was drawn before.
    RepeatedPair,
    /// A waypoint coincides with the start node or with the other waypoint.
    DegenerateWaypoints,
    /// Some leg has no connecting path.
    NoPath,
    /// A waypoint lies on the leg that should avoid it (collapsed triangle).
    Collinear,
    /// Too many repeated nodes along the closed path.
    Backtracking,
    /// Closed path found but its length misses the window.
    OutOfTolerance { length_km: f64 },
    Accepted(Loop),
}

/// Per-outcome counters for one run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub attempts: usize,
    pub repeated_pair: usize,
    pub degenerate_waypoints: usize,
    pub no_path: usize,
    pub collinear: usize,
    pub backtracking: usize,
    pub out_of_tolerance: usize,
    pub accepted: usize,
    /// True if the run stopped on the cancel flag before the budget ran out.
    pub cancelled: bool,
}

impl SearchStats {
    pub(crate) fn record(&mut self, outcome: &AttemptOutcome) {
        self.attempts += 1;
        match outcome {
            AttemptOutcome::RepeatedPair => self.repeated_pair += 1,
            AttemptOutcome::DegenerateWaypoints => self.degenerate_waypoints += 1,
            AttemptOutcome::NoPath => self.no_path += 1,
            AttemptOutcome::Collinear => self.collinear += 1,
            AttemptOutcome::Backtracking => self.backtracking += 1,
            AttemptOutcome::OutOfTolerance { .. } => self.out_of_tolerance += 1,
            AttemptOutcome::Accepted(_) => self.accepted += 1,
        }
    }
}

/// Loops in discovery order plus run counters.
#[derive(Clone, Debug, Default)]
pub struct SearchReport {
    pub loops: Vec<Loop>,
    pub stats: SearchStats,
}

/// Cooperative stop signal, checked once per attempt.
#[derive(Clone, Debug, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

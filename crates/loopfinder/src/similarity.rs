//! Near-duplicate removal by node-set Jaccard similarity.
//!
//! Order-sensitive: loops are visited in the given order and the first loop of
//! a similarity cluster is the one that survives.

use std::collections::HashSet;

use crate::search::SearchError;
use crate::types::{Loop, NodeId};

/// `|a ∩ b| / |a ∪ b|`; two empty sets score 0.
pub fn jaccard(a: &HashSet<NodeId>, b: &HashSet<NodeId>) -> f64 {
    let inter = a.intersection(b).count();
    let union = a.len() + b.len() - inter;
    if union == 0 {
        0.0
    } else {
        inter as f64 / union as f64
    }
}

pub fn validate_similarity_threshold(threshold: f64) -> Result<(), SearchError> {
    if threshold > 0.0 && threshold < 1.0 {
        Ok(())
    } else {
        Err(SearchError::InvalidConfig {
            reason: format!("similarity threshold must lie in (0, 1), got {threshold}"),
        })
    }
}

/// Drop every loop whose node set is more than `threshold` similar to an
/// earlier kept loop. Survivors keep their relative order.
pub fn filter_similar_loops(loops: Vec<Loop>, threshold: f64) -> Vec<Loop> {
    debug_assert!(threshold > 0.0 && threshold < 1.0);
    let total = loops.len();
    let mut kept = Vec::with_capacity(total);
    let mut seen: Vec<HashSet<NodeId>> = Vec::new();
    for candidate in loops {
        let nodes: HashSet<NodeId> = candidate.path.iter().copied().collect();
        let too_similar = seen.iter().any(|prev| jaccard(&nodes, prev) > threshold);
        if too_similar {
            continue;
        }
        seen.push(nodes);
        kept.push(candidate);
    }
    tracing::debug!(
        kept = kept.len(),
        discarded = total - kept.len(),
        threshold,
        "similarity filter"
    );
    kept
}

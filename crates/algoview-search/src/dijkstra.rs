//! Dijkstra's shortest paths with a recorded trace.
//!
//! The frontier is a plain sorted list rather than a heap with decrease-key.
//! A node can sit in the frontier several times with different distances;
//! only its first removal counts; later removals are dropped by the visited
//! check.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashSet};

use algoview_graph::Graph;
use tracing::debug;

use crate::error::{Error, Result};
use crate::snapshot::{NamedEdge, Snapshot, Trace};

/// Cost of traversing an edge that carries no weight.
pub const UNWEIGHTED_COST: f64 = 1.0;

/// Frontier order: the entry removed next sorts last.
///
/// Larger distances sort first. Among equal distances, larger names sort
/// first, so the smallest name is removed first.
fn frontier_order(x: &(String, f64), y: &(String, f64)) -> Ordering {
    y.1.total_cmp(&x.1).then_with(|| y.0.cmp(&x.0))
}

struct PathState {
    distances: BTreeMap<String, f64>,
    /// `(child, parent)` in order of first discovery
    predecessors: Vec<(String, String)>,
    visited: Vec<String>,
    seen: HashSet<String>,
    frontier: Vec<(String, f64)>,
    record: Vec<Snapshot>,
}

impl PathState {
    fn distance(&self, node: &str) -> f64 {
        self.distances.get(node).copied().unwrap_or(f64::INFINITY)
    }

    fn set_predecessor(&mut self, child: &str, parent: &str) {
        match self.predecessors.iter_mut().find(|(c, _)| c == child) {
            Some(entry) => entry.1 = parent.to_string(),
            None => self
                .predecessors
                .push((child.to_string(), parent.to_string())),
        }
    }

    fn save(&mut self, active: Option<&str>, highlight: Option<NamedEdge>) {
        self.record.push(Snapshot {
            visited: self.visited.clone(),
            frontier: self.frontier.iter().rev().map(|(n, _)| n.clone()).collect(),
            tree_edges: self
                .predecessors
                .iter()
                .map(|(child, parent)| (parent.clone(), child.clone()))
                .collect(),
            active: active.map(str::to_string),
            highlighted_edge: highlight,
            distances: Some(self.distances.clone()),
        });
    }
}

/// Compute shortest distances from `start` and record every step.
///
/// Snapshots are emitted:
/// - once before the loop and once after it (no active node),
/// - when a node is removed from the frontier for the first time,
/// - for each improved distance, with the relaxed edge highlighted.
///
/// Weights are assumed non-negative.
pub fn dijkstra(graph: &Graph, start: &str) -> Result<Trace> {
    if !graph.has_node(start) {
        return Err(Error::UnknownNode(start.to_string()));
    }

    let mut distances: BTreeMap<String, f64> = graph
        .nodes()
        .iter()
        .map(|n| (n.clone(), f64::INFINITY))
        .collect();
    distances.insert(start.to_string(), 0.0);

    let mut state = PathState {
        distances,
        predecessors: Vec::new(),
        visited: Vec::new(),
        seen: HashSet::new(),
        frontier: vec![(start.to_string(), 0.0)],
        record: Vec::new(),
    };

    state.save(None, None);
    while let Some((node, _)) = state.frontier.pop() {
        if !state.seen.insert(node.clone()) {
            continue;
        }
        state.visited.push(node.clone());
        state.save(Some(&node), None);

        let base = state.distance(&node);
        for neighbor in graph.neighbors(&node) {
            let weight = graph.weight(&node, neighbor).unwrap_or(UNWEIGHTED_COST);
            let candidate = base + weight;
            if candidate < state.distance(neighbor) {
                state.distances.insert(neighbor.to_string(), candidate);
                state.set_predecessor(neighbor, &node);
                state.frontier.push((neighbor.to_string(), candidate));
                state.frontier.sort_by(frontier_order);
                state.save(Some(&node), Some((node.clone(), neighbor.to_string())));
            }
        }
    }
    state.save(None, None);

    debug!(
        "Dijkstra from {} settled {} nodes in {} snapshots",
        start,
        state.visited.len(),
        state.record.len()
    );
    Ok(Trace::new(start, state.record))
}

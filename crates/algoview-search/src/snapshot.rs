//! Snapshots of traversal state for stepwise replay.

use std::collections::BTreeMap;

use serde::Serialize;

/// A `(from, to)` pair of node names.
pub type NamedEdge = (String, String);

/// Traversal state at one instant.
///
/// `highlighted_edge` is only set for events that discover or relax an
/// edge. `distances` is only set by Dijkstra; unreached nodes map to
/// infinity, which serializes as JSON `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    /// Visited nodes in visiting order
    pub visited: Vec<String>,
    /// Frontier contents, next to be removed first
    pub frontier: Vec<String>,
    /// Tree edges `(parent, child)` discovered so far
    pub tree_edges: Vec<NamedEdge>,
    /// Node being processed, if any
    pub active: Option<String>,
    /// Edge being discovered or relaxed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlighted_edge: Option<NamedEdge>,
    /// Best known distance per node
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distances: Option<BTreeMap<String, f64>>,
}

impl Snapshot {
    /// True for the bracketing snapshots emitted before and after the loop.
    pub fn is_idle(&self) -> bool {
        self.active.is_none()
    }

    /// Distance to `node`, if this snapshot carries distances.
    pub fn distance(&self, node: &str) -> Option<f64> {
        self.distances.as_ref()?.get(node).copied()
    }
}

/// The recorded sequence of snapshots for one run.
///
/// Always holds at least the initial and final idle snapshots.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trace {
    start: String,
    snapshots: Vec<Snapshot>,
}

impl Trace {
    pub(crate) fn new(start: impl Into<String>, snapshots: Vec<Snapshot>) -> Self {
        Self {
            start: start.into(),
            snapshots,
        }
    }

    /// The node the run started from.
    pub fn start(&self) -> &str {
        &self.start
    }

    /// All snapshots in order.
    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }

    /// Snapshot at `index`.
    pub fn get(&self, index: usize) -> Option<&Snapshot> {
        self.snapshots.get(index)
    }

    /// Number of snapshots.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// True if no snapshots were recorded.
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// The terminal snapshot.
    pub fn last(&self) -> Option<&Snapshot> {
        self.snapshots.last()
    }

    /// Final visiting order.
    pub fn visit_order(&self) -> &[String] {
        self.last().map(|s| s.visited.as_slice()).unwrap_or_default()
    }

    /// Serialize the whole trace to JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

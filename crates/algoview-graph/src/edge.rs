//! Graph edges.
//!
//! On the wire an edge is the three-element array `[a, b, weight]`, with
//! `null` standing in for an unweighted edge.

use serde::{Deserialize, Serialize};

/// Array form used by the persisted document.
type EdgeRecord = (String, String, Option<f64>);

/// An edge between two named nodes.
///
/// For a directed graph the edge runs from `a` to `b`. For an undirected
/// graph the endpoint order carries no meaning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "EdgeRecord", into = "EdgeRecord")]
pub struct Edge {
    /// First endpoint (source, if directed)
    pub a: String,
    /// Second endpoint (target, if directed)
    pub b: String,
    /// Optional weight
    pub weight: Option<f64>,
}

impl Edge {
    /// Create a new edge.
    pub fn new(a: impl Into<String>, b: impl Into<String>, weight: Option<f64>) -> Self {
        Self {
            a: a.into(),
            b: b.into(),
            weight,
        }
    }

    /// Check whether this edge joins `x` and `y`.
    ///
    /// The reverse orientation only matches when `directed` is false.
    pub fn connects(&self, x: &str, y: &str, directed: bool) -> bool {
        (self.a == x && self.b == y) || (!directed && self.a == y && self.b == x)
    }

    /// Check whether either endpoint is `name`.
    pub fn touches(&self, name: &str) -> bool {
        self.a == name || self.b == name
    }

    /// The endpoint opposite `name`, if this edge touches it.
    pub fn other(&self, name: &str) -> Option<&str> {
        if self.a == name {
            Some(&self.b)
        } else if self.b == name {
            Some(&self.a)
        } else {
            None
        }
    }
}

impl From<EdgeRecord> for Edge {
    fn from((a, b, weight): EdgeRecord) -> Self {
        Self { a, b, weight }
    }
}

impl From<Edge> for EdgeRecord {
    fn from(edge: Edge) -> Self {
        (edge.a, edge.b, edge.weight)
    }
}

/// Structural equality of two edges under a given directedness.
///
/// An edge equals its reverse iff the graph is undirected. Weights are
/// ignored.
pub fn edges_equal(x: &Edge, y: &Edge, directed: bool) -> bool {
    x.connects(&y.a, &y.b, directed)
}

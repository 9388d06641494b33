//! The mutable graph model.
//!
//! Nodes are unique names kept in insertion order. Edges reference nodes by
//! name. Structural edits that would break an invariant are rejected with a
//! `false` return and leave the graph untouched.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use algoview_history::Checkpoint;

use crate::edge::{edges_equal, Edge};
use crate::error::{Error, Result};

/// Persisted form of a graph.
///
/// Directedness is not part of the document; it belongs to the host view and
/// is supplied again on load. Missing keys read as empty lists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphDocument {
    /// Node names in insertion order
    #[serde(default)]
    pub nodes: Vec<String>,
    /// Edges as `[a, b, weight]` triples
    #[serde(default)]
    pub edges: Vec<Edge>,
}

/// A graph of named nodes and optionally weighted edges.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Graph {
    nodes: Vec<String>,
    edges: Vec<Edge>,
    directed: bool,
}

impl Graph {
    /// Create an empty graph.
    pub fn new(directed: bool) -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            directed,
        }
    }

    /// Whether edges are one-way.
    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// Switch directedness.
    ///
    /// Going undirected merges each `(a, b)` / `(b, a)` pair into the edge
    /// stored first, which keeps its weight. Returns the number of edges
    /// dropped by the merge.
    pub fn set_directed(&mut self, directed: bool) -> usize {
        self.directed = directed;
        if directed {
            return 0;
        }

        let before = self.edges.len();
        let mut kept: Vec<Edge> = Vec::with_capacity(before);
        for edge in std::mem::take(&mut self.edges) {
            if kept.iter().any(|k| edges_equal(k, &edge, false)) {
                debug!("Merged edge {} -> {} into its reverse", edge.a, edge.b);
            } else {
                kept.push(edge);
            }
        }
        self.edges = kept;
        before - self.edges.len()
    }

    /// True if the graph has no nodes and no edges.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Node names in insertion order.
    pub fn nodes(&self) -> &[String] {
        &self.nodes
    }

    /// Edges in insertion order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Remove every node and edge.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
    }

    /// Check whether a node exists.
    pub fn has_node(&self, name: &str) -> bool {
        self.nodes.iter().any(|n| n == name)
    }

    /// Add a node.
    ///
    /// Returns false, without mutating, if the name is already taken.
    pub fn add_node(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if self.has_node(&name) {
            debug!("Node {} already exists", name);
            return false;
        }
        self.nodes.push(name);
        true
    }

    /// Remove a node and every edge touching it.
    ///
    /// Returns false if the node does not exist.
    pub fn remove_node(&mut self, name: &str) -> bool {
        let Some(index) = self.nodes.iter().position(|n| n == name) else {
            debug!("Node {} does not exist", name);
            return false;
        };
        self.nodes.remove(index);
        self.edges.retain(|edge| !edge.touches(name));
        true
    }

    /// Add an edge between two existing nodes.
    ///
    /// Returns false, without mutating, if either endpoint is missing, the
    /// weight is NaN or infinite, or the edge already exists (in either
    /// orientation when undirected).
    pub fn add_edge(&mut self, a: impl Into<String>, b: impl Into<String>, weight: Option<f64>) -> bool {
        let edge = Edge::new(a, b, weight);
        if edge.weight.is_some_and(|w| !w.is_finite()) {
            debug!("Weight of {} -> {} is not finite", edge.a, edge.b);
            return false;
        }
        if !self.has_node(&edge.a) || !self.has_node(&edge.b) {
            debug!("One or both nodes {} and {} do not exist", edge.a, edge.b);
            return false;
        }
        if self.edges.iter().any(|e| edges_equal(e, &edge, self.directed)) {
            debug!("Edge between {} and {} already exists", edge.a, edge.b);
            return false;
        }
        self.edges.push(edge);
        true
    }

    /// Remove the edge joining `a` and `b`.
    ///
    /// Returns false if no such edge exists.
    pub fn remove_edge(&mut self, a: &str, b: &str) -> bool {
        match self.find_edge(a, b) {
            Some(index) => {
                self.edges.remove(index);
                true
            }
            None => {
                debug!("Edge between {} and {} does not exist", a, b);
                false
            }
        }
    }

    /// Check whether an edge joins `a` and `b`.
    pub fn has_edge(&self, a: &str, b: &str) -> bool {
        self.find_edge(a, b).is_some()
    }

    /// Weight of the edge joining `a` and `b`.
    ///
    /// `None` if there is no such edge or the edge is unweighted.
    pub fn weight(&self, a: &str, b: &str) -> Option<f64> {
        self.find_edge(a, b).and_then(|i| self.edges[i].weight)
    }

    /// Names adjacent to `name`, sorted ascending.
    ///
    /// For a directed graph only outgoing edges count.
    pub fn neighbors(&self, name: &str) -> Vec<&str> {
        let mut result: Vec<&str> = if self.directed {
            self.edges
                .iter()
                .filter(|e| e.a == name)
                .map(|e| e.b.as_str())
                .collect()
        } else {
            self.edges.iter().filter_map(|e| e.other(name)).collect()
        };
        result.sort_unstable();
        result
    }

    /// Structural equality of two edges under this graph's directedness.
    pub fn edges_equal(&self, x: &Edge, y: &Edge) -> bool {
        edges_equal(x, y, self.directed)
    }

    fn find_edge(&self, a: &str, b: &str) -> Option<usize> {
        self.edges.iter().position(|e| e.connects(a, b, self.directed))
    }

    /// The persisted document for this graph.
    pub fn to_document(&self) -> GraphDocument {
        GraphDocument {
            nodes: self.nodes.clone(),
            edges: self.edges.clone(),
        }
    }

    /// Build a graph from a document, checking every invariant.
    ///
    /// Fails on the first duplicate node, dangling endpoint or duplicate
    /// edge; no partial graph is ever returned.
    pub fn from_document(document: GraphDocument, directed: bool) -> Result<Self> {
        let mut graph = Graph::new(directed);
        for name in document.nodes {
            if graph.has_node(&name) {
                return Err(Error::Malformed(format!("duplicate node {}", name)));
            }
            graph.nodes.push(name);
        }
        for edge in document.edges {
            if !graph.has_node(&edge.a) || !graph.has_node(&edge.b) {
                return Err(Error::Malformed(format!(
                    "edge {} -> {} references a missing node",
                    edge.a, edge.b
                )));
            }
            if graph.edges.iter().any(|e| edges_equal(e, &edge, directed)) {
                return Err(Error::Malformed(format!(
                    "duplicate edge {} -> {}",
                    edge.a, edge.b
                )));
            }
            graph.edges.push(edge);
        }
        Ok(graph)
    }

    /// Serialize to the JSON wire format.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.to_document())?)
    }

    /// Parse the JSON wire format.
    pub fn from_json(text: &str, directed: bool) -> Result<Self> {
        let document: GraphDocument = serde_json::from_str(text)?;
        let graph = Self::from_document(document, directed)?;
        info!(
            "Loaded graph with {} nodes, {} edges",
            graph.node_count(),
            graph.edge_count()
        );
        Ok(graph)
    }

    /// Parse the JSON wire format, falling back to an empty graph.
    ///
    /// The error, if any, is returned alongside so the host can report it.
    pub fn from_json_or_empty(text: &str, directed: bool) -> (Self, Option<Error>) {
        match Self::from_json(text, directed) {
            Ok(graph) => (graph, None),
            Err(e) => {
                warn!("Failed to parse graph, starting empty: {}", e);
                (Self::new(directed), Some(e))
            }
        }
    }
}

/// Undo state: the document plus directedness, which the document omits.
#[derive(Serialize, Deserialize)]
struct GraphState {
    directed: bool,
    #[serde(flatten)]
    document: GraphDocument,
}

impl Checkpoint for Graph {
    type Error = Error;

    fn checkpoint(&self) -> Result<String> {
        let state = GraphState {
            directed: self.directed,
            document: self.to_document(),
        };
        Ok(serde_json::to_string(&state)?)
    }

    fn restore(&mut self, state: &str) -> Result<()> {
        let state: GraphState = serde_json::from_str(state)?;
        *self = Self::from_document(state.document, state.directed)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abc(directed: bool) -> Graph {
        let mut graph = Graph::new(directed);
        for name in ["A", "B", "C"] {
            assert!(graph.add_node(name));
        }
        graph
    }

    #[test]
    fn duplicate_node_rejected() {
        let mut graph = abc(false);
        assert!(!graph.add_node("A"));
        assert_eq!(graph.node_count(), 3);
    }

    #[test]
    fn add_edge_twice_rejected_in_either_orientation() {
        let mut graph = abc(false);
        assert!(graph.add_edge("A", "B", Some(1.0)));
        assert!(!graph.add_edge("A", "B", Some(1.0)));
        assert!(!graph.add_edge("B", "A", None));
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn directed_allows_both_orientations() {
        let mut graph = abc(true);
        assert!(graph.add_edge("A", "B", None));
        assert!(graph.add_edge("B", "A", None));
        assert!(!graph.add_edge("A", "B", None));
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn edge_to_missing_node_rejected() {
        let mut graph = abc(false);
        assert!(!graph.add_edge("A", "Z", None));
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn remove_node_cascades_to_touching_edges_only() {
        let mut graph = abc(false);
        graph.add_node("D");
        graph.add_edge("A", "B", None);
        graph.add_edge("C", "A", None);
        graph.add_edge("B", "C", None);
        graph.add_edge("C", "D", None);

        assert!(graph.remove_node("A"));
        assert!(!graph.has_node("A"));
        assert_eq!(graph.edge_count(), 2);
        assert!(graph.has_edge("B", "C"));
        assert!(graph.has_edge("C", "D"));
    }

    #[test]
    fn remove_missing_node_is_noop() {
        let mut graph = abc(false);
        graph.add_edge("A", "B", None);
        assert!(!graph.remove_node("Z"));
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn remove_edge_respects_direction() {
        let mut graph = abc(true);
        graph.add_edge("A", "B", None);
        assert!(!graph.remove_edge("B", "A"));
        assert!(graph.remove_edge("A", "B"));

        let mut undirected = abc(false);
        undirected.add_edge("A", "B", None);
        assert!(undirected.remove_edge("B", "A"));
        assert_eq!(undirected.edge_count(), 0);
    }

    #[test]
    fn weight_lookup() {
        let mut graph = abc(false);
        graph.add_edge("A", "B", Some(4.0));
        graph.add_edge("B", "C", None);
        assert_eq!(graph.weight("B", "A"), Some(4.0));
        assert_eq!(graph.weight("B", "C"), None);
        assert_eq!(graph.weight("A", "C"), None);
    }

    #[test]
    fn neighbors_are_sorted_and_direction_aware() {
        let mut graph = abc(true);
        graph.add_node("D");
        graph.add_edge("A", "D", None);
        graph.add_edge("A", "B", None);
        graph.add_edge("C", "A", None);

        assert_eq!(graph.neighbors("A"), vec!["B", "D"]);
        assert!(graph.neighbors("B").is_empty());

        graph.set_directed(false);
        assert_eq!(graph.neighbors("A"), vec!["B", "C", "D"]);
        assert_eq!(graph.neighbors("B"), vec!["A"]);
    }

    #[test]
    fn json_round_trip() {
        let mut graph = abc(false);
        graph.add_edge("A", "B", Some(5.0));
        graph.add_edge("B", "C", None);

        let json = graph.to_json().unwrap();
        assert_eq!(
            json,
            r#"{"nodes":["A","B","C"],"edges":[["A","B",5.0],["B","C",null]]}"#
        );
        let parsed = Graph::from_json(&json, false).unwrap();
        assert_eq!(parsed, graph);
    }

    #[test]
    fn missing_keys_default_to_empty() {
        let graph = Graph::from_json("{}", true).unwrap();
        assert!(graph.is_empty());
        assert!(graph.is_directed());

        let graph = Graph::from_json(r#"{"nodes":["A"]}"#, false).unwrap();
        assert_eq!(graph.nodes(), ["A".to_string()]);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn malformed_input_yields_empty_graph() {
        for text in [
            "not json",
            r#"{"nodes":["A","A"]}"#,
            r#"{"nodes":["A"],"edges":[["A","B",null]]}"#,
            r#"{"nodes":["A","B"],"edges":[["A","B",1],["B","A",2]]}"#,
        ] {
            let (graph, error) = Graph::from_json_or_empty(text, false);
            assert!(graph.is_empty(), "partial graph from {}", text);
            assert!(error.is_some(), "no error for {}", text);
        }
    }

    #[test]
    fn going_undirected_merges_reverse_pairs() {
        let mut graph = abc(true);
        graph.add_edge("A", "B", Some(1.0));
        graph.add_edge("B", "A", Some(9.0));
        graph.add_edge("B", "C", None);

        assert_eq!(graph.set_directed(false), 1);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.neighbors("A"), vec!["B"]);
        assert_eq!(graph.weight("B", "A"), Some(1.0));

        // The merged graph is a valid undirected document.
        let reloaded = Graph::from_json(&graph.to_json().unwrap(), false).unwrap();
        assert_eq!(reloaded, graph);

        assert_eq!(graph.set_directed(true), 0);
        assert!(graph.has_edge("A", "B"));
        assert!(!graph.has_edge("B", "A"));
    }

    #[test]
    fn non_finite_weight_rejected() {
        let mut graph = abc(false);
        assert!(!graph.add_edge("A", "B", Some(f64::NAN)));
        assert!(!graph.add_edge("A", "B", Some(f64::INFINITY)));
        assert!(!graph.add_edge("A", "B", Some(f64::NEG_INFINITY)));
        assert_eq!(graph.edge_count(), 0);
        assert!(graph.add_edge("A", "B", Some(0.5)));
    }

    #[test]
    fn checkpoint_carries_directedness() {
        let mut graph = abc(true);
        graph.add_edge("A", "B", None);
        graph.add_edge("B", "A", None);
        let state = graph.checkpoint().unwrap();

        graph.set_directed(false);
        graph.restore(&state).unwrap();
        assert!(graph.is_directed());
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn checkpoint_restore_keeps_directedness() {
        let mut graph = abc(true);
        graph.add_edge("A", "B", None);
        let state = graph.checkpoint().unwrap();

        graph.clear();
        graph.restore(&state).unwrap();
        assert!(graph.is_directed());
        assert!(graph.has_edge("A", "B"));
        assert!(!graph.has_edge("B", "A"));
    }
}

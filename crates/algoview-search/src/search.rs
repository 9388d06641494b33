//! Generalized graph search.
//!
//! DFS and BFS are the same algorithm with two knobs: which end of the
//! frontier to remove from, and in which order to push neighbors. Pushing
//! neighbors in descending order onto a stack pops them ascending, so both
//! configurations visit siblings in sorted order.

use std::collections::{HashSet, VecDeque};

use algoview_graph::Graph;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::snapshot::{NamedEdge, Snapshot, Trace};

/// Which end of the frontier the next candidate is taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Removal {
    /// Stack behavior
    Last,
    /// Queue behavior
    First,
}

/// Order in which a node's neighbors are pushed onto the frontier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NeighborOrder {
    /// Sorted ascending
    Ascending,
    /// Sorted descending
    Descending,
}

/// Frontier configuration for [`graph_search`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStrategy {
    pub removal: Removal,
    pub order: NeighborOrder,
}

impl SearchStrategy {
    /// Depth-first: stack, neighbors pushed in reverse sorted order.
    pub const DEPTH_FIRST: Self = Self {
        removal: Removal::Last,
        order: NeighborOrder::Descending,
    };

    /// Breadth-first: queue, neighbors pushed in sorted order.
    pub const BREADTH_FIRST: Self = Self {
        removal: Removal::First,
        order: NeighborOrder::Ascending,
    };

    fn take(&self, frontier: &mut VecDeque<Candidate>) -> Option<Candidate> {
        match self.removal {
            Removal::Last => frontier.pop_back(),
            Removal::First => frontier.pop_front(),
        }
    }

    fn arrange<'a>(&self, mut neighbors: Vec<&'a str>) -> Vec<&'a str> {
        if self.order == NeighborOrder::Descending {
            neighbors.reverse();
        }
        neighbors
    }

    fn removal_order(&self, frontier: &VecDeque<Candidate>) -> Vec<String> {
        let names = frontier.iter().map(|c| c.node.clone());
        match self.removal {
            Removal::Last => names.rev().collect(),
            Removal::First => names.collect(),
        }
    }
}

/// A frontier entry: a node and the node it was discovered from.
#[derive(Debug, Clone)]
struct Candidate {
    node: String,
    from: Option<String>,
}

/// Mutable traversal state that snapshots are cut from.
struct SearchState {
    strategy: SearchStrategy,
    visited: Vec<String>,
    seen: HashSet<String>,
    frontier: VecDeque<Candidate>,
    tree: Vec<NamedEdge>,
    record: Vec<Snapshot>,
}

impl SearchState {
    fn save(&mut self, active: Option<&str>, highlight: Option<NamedEdge>) {
        self.record.push(Snapshot {
            visited: self.visited.clone(),
            frontier: self.strategy.removal_order(&self.frontier),
            tree_edges: self.tree.clone(),
            active: active.map(str::to_string),
            highlighted_edge: highlight,
            distances: None,
        });
    }
}

/// Run a search from `start` and record every step.
///
/// Snapshots are emitted:
/// - once before the loop and once after it (no active node),
/// - when a node is visited,
/// - for each unvisited neighbor pushed, with that edge highlighted.
pub fn graph_search(graph: &Graph, start: &str, strategy: SearchStrategy) -> Result<Trace> {
    if !graph.has_node(start) {
        return Err(Error::UnknownNode(start.to_string()));
    }

    let mut state = SearchState {
        strategy,
        visited: Vec::new(),
        seen: HashSet::new(),
        frontier: VecDeque::from([Candidate {
            node: start.to_string(),
            from: None,
        }]),
        tree: Vec::new(),
        record: Vec::new(),
    };

    state.save(None, None);
    while let Some(candidate) = strategy.take(&mut state.frontier) {
        if state.seen.contains(&candidate.node) {
            continue;
        }
        let node = candidate.node;
        state.seen.insert(node.clone());
        state.visited.push(node.clone());
        if let Some(parent) = candidate.from {
            state.tree.push((parent, node.clone()));
        }
        state.save(Some(&node), None);

        for neighbor in strategy.arrange(graph.neighbors(&node)) {
            if state.seen.contains(neighbor) {
                continue;
            }
            state.frontier.push_back(Candidate {
                node: neighbor.to_string(),
                from: Some(node.clone()),
            });
            state.save(Some(&node), Some((node.clone(), neighbor.to_string())));
        }
    }
    state.save(None, None);

    debug!(
        "Search from {} visited {} nodes in {} snapshots",
        start,
        state.visited.len(),
        state.record.len()
    );
    Ok(Trace::new(start, state.record))
}

/// Depth-first search from `start`.
pub fn dfs(graph: &Graph, start: &str) -> Result<Trace> {
    graph_search(graph, start, SearchStrategy::DEPTH_FIRST)
}

/// Breadth-first search from `start`.
pub fn bfs(graph: &Graph, start: &str) -> Result<Trace> {
    graph_search(graph, start, SearchStrategy::BREADTH_FIRST)
}

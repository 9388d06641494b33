//! Algorithm selection.

use std::fmt;
use std::str::FromStr;

use algoview_graph::Graph;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::dijkstra::dijkstra;
use crate::error::{Error, Result};
use crate::search::{bfs, dfs};
use crate::snapshot::Trace;

/// The traversals a host can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    /// Depth-first search
    Dfs,
    /// Breadth-first search
    Bfs,
    /// Dijkstra's shortest paths
    Dijkstra,
}

impl Algorithm {
    /// All algorithms, in menu order.
    pub const ALL: [Algorithm; 3] = [Algorithm::Dfs, Algorithm::Bfs, Algorithm::Dijkstra];

    /// Short lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Dfs => "dfs",
            Algorithm::Bfs => "bfs",
            Algorithm::Dijkstra => "dijkstra",
        }
    }

    /// Whether snapshots carry distances.
    pub fn tracks_distances(&self) -> bool {
        matches!(self, Algorithm::Dijkstra)
    }

    /// Run over the current structure of `graph`.
    pub fn run(&self, graph: &Graph, start: &str) -> Result<Trace> {
        let trace = match self {
            Algorithm::Dfs => dfs(graph, start),
            Algorithm::Bfs => bfs(graph, start),
            Algorithm::Dijkstra => dijkstra(graph, start),
        }?;
        info!(
            "{} from {}: {} snapshots, {} visited",
            self,
            start,
            trace.len(),
            trace.visit_order().len()
        );
        Ok(trace)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Algorithm::ALL
            .into_iter()
            .find(|a| a.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::UnknownAlgorithm(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_names() {
        assert_eq!("dfs".parse::<Algorithm>(), Ok(Algorithm::Dfs));
        assert_eq!("BFS".parse::<Algorithm>(), Ok(Algorithm::Bfs));
        assert_eq!("Dijkstra".parse::<Algorithm>(), Ok(Algorithm::Dijkstra));
        assert!("astar".parse::<Algorithm>().is_err());
    }

    #[test]
    fn run_dispatches() {
        let mut graph = Graph::new(false);
        graph.add_node("A");
        graph.add_node("B");
        graph.add_edge("A", "B", Some(2.0));

        for algorithm in Algorithm::ALL {
            let trace = algorithm.run(&graph, "A").unwrap();
            assert_eq!(trace.visit_order(), ["A", "B"]);
            let has_distances = trace.snapshots().iter().all(|s| s.distances.is_some());
            assert_eq!(has_distances, algorithm.tracks_distances());
        }
    }

    #[test]
    fn serde_names() {
        let json = serde_json::to_string(&Algorithm::Dijkstra).unwrap();
        assert_eq!(json, r#""dijkstra""#);
    }
}

//! Algoview Search
//!
//! Graph traversals that record their own execution so a host can scrub
//! forward and backward through it.
//!
//! # Architecture
//!
//! - **Search**: one driver for DFS and BFS, configured by frontier removal
//!   end and neighbor push order
//! - **Dijkstra**: shortest paths over a sorted frontier with stale entries
//! - **Snapshot / Trace**: the immutable recorded states
//! - **Stepper**: a clamped cursor over a trace
//!
//! Traces are computed eagerly and in full; stepping never re-runs anything.
//!
//! # Usage
//!
//! ```
//! use algoview_graph::Graph;
//! use algoview_search::{Algorithm, Stepper};
//!
//! let mut graph = Graph::new(false);
//! graph.add_node("A");
//! graph.add_node("B");
//! graph.add_edge("A", "B", Some(1.0));
//!
//! let trace = Algorithm::Bfs.run(&graph, "A").unwrap();
//! let mut stepper = Stepper::new(trace);
//! stepper.step_forward();
//! assert_eq!(stepper.current().unwrap().active.as_deref(), Some("A"));
//! ```

mod algorithm;
mod dijkstra;
mod error;
mod search;
mod snapshot;
mod stepper;

pub use algorithm::Algorithm;
pub use dijkstra::{dijkstra, UNWEIGHTED_COST};
pub use error::{Error, Result};
pub use search::{bfs, dfs, graph_search, NeighborOrder, Removal, SearchStrategy};
pub use snapshot::{NamedEdge, Snapshot, Trace};
pub use stepper::{Stepper, StepperStatus};

//! Algoview Graph Model
//!
//! A small, human-scale graph of uniquely named nodes joined by optionally
//! weighted edges. The model only answers structural questions (existence,
//! adjacency, weights); traversal lives in `algoview-search`.
//!
//! # Invariants
//!
//! - Node names are unique.
//! - Every edge references two existing nodes.
//! - At most one edge per unordered pair (undirected) or ordered pair
//!   (directed). For an undirected graph `(a, b)` and `(b, a)` never coexist.
//!
//! # Wire Format
//!
//! ```text
//! { "nodes": ["A", "B"], "edges": [["A", "B", 5], ["B", "A", null]] }
//! ```
//!
//! Directedness is not persisted; the host supplies it on load.

mod edge;
mod error;
mod graph;

pub use edge::{edges_equal, Edge};
pub use error::{Error, Result};
pub use graph::{Graph, GraphDocument};

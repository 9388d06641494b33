//! Error types for algoview-tree.

use thiserror::Error;

use crate::tree::NodeId;

/// Result type for tree operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in tree operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The id does not name a node in this tree
    #[error("unknown node {0}")]
    UnknownNode(NodeId),

    /// A rotation was requested on two nodes that are not parent and child
    #[error("nodes {0} and {1} are not parent and child")]
    NotAdjacent(NodeId, NodeId),

    /// The persisted text was not a valid tree
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

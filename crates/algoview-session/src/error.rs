//! Error types for algoview-session.

use thiserror::Error;

/// Result type for session operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in session operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Graph model error
    #[error("Graph error: {0}")]
    Graph(#[from] algoview_graph::Error),

    /// Tree model error
    #[error("Tree error: {0}")]
    Tree(#[from] algoview_tree::Error),

    /// Search error
    #[error("Search error: {0}")]
    Search(#[from] algoview_search::Error),

    /// Store key is not usable
    #[error("Invalid store key: {0}")]
    InvalidKey(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

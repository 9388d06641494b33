//! Error types for algoview-search.

use thiserror::Error;

/// Result type for search operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when starting a run.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// The start node is not in the graph
    #[error("unknown start node: {0}")]
    UnknownNode(String),

    /// The algorithm name was not recognized
    #[error("unknown algorithm: {0}")]
    UnknownAlgorithm(String),
}

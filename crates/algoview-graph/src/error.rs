//! Error types for algoview-graph.

use thiserror::Error;

/// Result type for graph operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading a graph.
#[derive(Debug, Error)]
pub enum Error {
    /// The persisted text was not valid JSON for a graph document
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The document parsed but breaks a graph invariant
    #[error("Malformed graph: {0}")]
    Malformed(String),
}

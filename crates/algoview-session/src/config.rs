//! Session configuration.

use algoview_history::DEFAULT_CAPACITY;
use algoview_tree::{Color, DEFAULT_NEW_NODE_COLOR};
use tracing::warn;

/// Configuration shared by the graph and tree sessions.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    /// Undo/redo depth
    pub history_capacity: usize,

    /// Whether new graphs are directed
    pub directed: bool,

    /// Color given to inserted tree nodes
    pub new_node_color: Color,

    /// Store key for the graph
    pub graph_key: String,

    /// Store key for the tree
    pub tree_key: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_CAPACITY,
            directed: true,
            new_node_color: DEFAULT_NEW_NODE_COLOR,
            graph_key: "graph".to_string(),
            tree_key: "root".to_string(),
        }
    }
}

impl SessionConfig {
    /// Create config from environment variables, keeping defaults for
    /// anything unset or unparseable.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Create config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup("ALGOVIEW_HISTORY_CAPACITY") {
            match raw.parse::<usize>() {
                Ok(capacity) if capacity > 0 => config.history_capacity = capacity,
                _ => warn!("Ignoring invalid ALGOVIEW_HISTORY_CAPACITY={}", raw),
            }
        }

        if let Some(raw) = lookup("ALGOVIEW_DIRECTED") {
            match raw.to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => config.directed = true,
                "0" | "false" | "no" => config.directed = false,
                _ => warn!("Ignoring invalid ALGOVIEW_DIRECTED={}", raw),
            }
        }

        if let Some(raw) = lookup("ALGOVIEW_NEW_NODE_COLOR") {
            match raw.parse::<Color>() {
                Ok(color) => config.new_node_color = color,
                Err(e) => warn!("Ignoring ALGOVIEW_NEW_NODE_COLOR: {}", e),
            }
        }

        if let Some(key) = lookup("ALGOVIEW_GRAPH_KEY") {
            config.graph_key = key;
        }
        if let Some(key) = lookup("ALGOVIEW_TREE_KEY") {
            config.tree_key = key;
        }

        config
    }
}

//! Algoview Session: host-side state for the visualizers.
//!
//! A session owns one structure together with everything a host view needs
//! around it: undo/redo history, persistence, the node under the pointer and
//! the current selection. There is no process-wide state; a host creates one
//! session per view.
//!
//! # Example
//!
//! ```
//! use algoview_search::Algorithm;
//! use algoview_session::{GraphSession, MemoryStore, SessionConfig};
//!
//! let mut session = GraphSession::open(SessionConfig::default(), MemoryStore::new())?;
//! session.add_node("A")?;
//! session.add_node("B")?;
//! session.add_edge("A", "B", Some(2.0))?;
//!
//! session.run(Algorithm::Dijkstra, "A")?;
//! session.seek(usize::MAX);
//! assert_eq!(session.snapshot().and_then(|s| s.distance("B")), Some(2.0));
//!
//! session.undo()?;
//! assert_eq!(session.graph().edge_count(), 0);
//! # Ok::<(), algoview_session::Error>(())
//! ```

pub mod config;
pub mod error;
pub mod graph_session;
pub mod store;
pub mod tree_session;

mod tracked;

pub use config::SessionConfig;
pub use error::{Error, Result};
pub use graph_session::{GraphSession, Run};
pub use store::{FileStore, MemoryStore, StateStore};
pub use tree_session::{ClickOutcome, TreeSession};

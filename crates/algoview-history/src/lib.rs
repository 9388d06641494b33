//! Algoview History
//!
//! Bounded undo/redo over opaque serialized states. The manager never looks
//! inside a state; any component that can render its structure to a string
//! and rebuild from one plugs in through [`Checkpoint`].
//!
//! # Semantics
//!
//! - `push` discards every entry past the current position, appends, evicts
//!   the oldest entries once over capacity, and moves to the newest entry.
//! - `undo` / `redo` move one position and hand the entry at the new
//!   position to the restore callback. Both are no-ops at the ends.

mod checkpoint;
mod history;

pub use checkpoint::Checkpoint;
pub use history::{History, DEFAULT_CAPACITY};

//! Structural state capture for undo/redo.

/// A component whose whole structural state round-trips through a string.
///
/// `restore(checkpoint())` must leave the component structurally unchanged.
/// Derived data (cached indices, back-references) is not part of the state
/// and is rebuilt by `restore`.
pub trait Checkpoint {
    /// Error raised when a state cannot be produced or applied.
    type Error;

    /// Capture the current structure.
    fn checkpoint(&self) -> Result<String, Self::Error>;

    /// Replace the current structure with a captured one.
    fn restore(&mut self, state: &str) -> Result<(), Self::Error>;
}

//! The bounded undo/redo stack.

use std::collections::VecDeque;
use std::fmt;

use tracing::debug;

/// Number of states kept when no capacity is given.
pub const DEFAULT_CAPACITY: usize = 80;

type RestoreFn<S> = Box<dyn FnMut(&S)>;

/// Undo/redo history over states of type `S`.
///
/// Invariant: `index < len` whenever `len > 0`.
pub struct History<S = String> {
    entries: VecDeque<S>,
    index: usize,
    capacity: usize,
    on_restore: Option<RestoreFn<S>>,
}

impl<S> History<S> {
    /// Create an empty history holding at most `capacity` states.
    ///
    /// A capacity of zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            index: 0,
            capacity: capacity.max(1),
            on_restore: None,
        }
    }

    /// Create a history that calls `on_restore` whenever undo/redo moves.
    pub fn with_callback<F>(capacity: usize, on_restore: F) -> Self
    where
        F: FnMut(&S) + 'static,
    {
        let mut history = Self::new(capacity);
        history.on_restore = Some(Box::new(on_restore));
        history
    }

    /// Replace the restore callback.
    pub fn set_callback<F>(&mut self, on_restore: F)
    where
        F: FnMut(&S) + 'static,
    {
        self.on_restore = Some(Box::new(on_restore));
    }

    /// Record a new state.
    ///
    /// Entries after the current position are discarded first.
    pub fn push(&mut self, state: S) {
        if !self.entries.is_empty() {
            self.entries.truncate(self.index + 1);
        }
        self.entries.push_back(state);
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
        self.index = self.entries.len() - 1;
        debug!("History push: {} entries, index {}", self.entries.len(), self.index);
    }

    /// Step back one state.
    ///
    /// Returns the restored state, or `None` at the oldest entry.
    pub fn undo(&mut self) -> Option<&S> {
        if self.index == 0 {
            return None;
        }
        self.index -= 1;
        self.notify()
    }

    /// Step forward one state.
    ///
    /// Returns the restored state, or `None` at the newest entry.
    pub fn redo(&mut self) -> Option<&S> {
        if self.index + 1 >= self.entries.len() {
            return None;
        }
        self.index += 1;
        self.notify()
    }

    fn notify(&mut self) -> Option<&S> {
        let state = self.entries.get(self.index)?;
        if let Some(on_restore) = self.on_restore.as_mut() {
            on_restore(state);
        }
        Some(state)
    }

    /// Whether `undo` would move.
    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    /// Whether `redo` would move.
    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.entries.len()
    }

    /// The state at the current position.
    pub fn current(&self) -> Option<&S> {
        self.entries.get(self.index)
    }

    /// Current position.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Number of stored states.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing has been pushed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of stored states.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Stored states, oldest first.
    pub fn entries(&self) -> impl Iterator<Item = &S> {
        self.entries.iter()
    }

    /// Drop every stored state.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.index = 0;
    }
}

impl<S> Default for History<S> {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl<S: fmt::Debug> fmt::Debug for History<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("History")
            .field("entries", &self.entries)
            .field("index", &self.index)
            .field("capacity", &self.capacity)
            .field("on_restore", &self.on_restore.is_some())
            .finish()
    }
}

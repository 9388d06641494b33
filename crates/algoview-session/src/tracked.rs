//! A structure paired with its undo history and store key.
//!
//! Edits and restores are staged on a copy. The live value, the history
//! index and the stored text only change once every step has succeeded.

use algoview_graph::Graph;
use algoview_history::{Checkpoint, History};
use algoview_tree::Tree;
use tracing::debug;

use crate::error::{Error, Result};
use crate::store::StateStore;

/// A structure with a persisted form next to its undo state.
///
/// The undo state may carry more than the persisted form (a graph's
/// directedness, for example).
pub(crate) trait Stored: Checkpoint + Clone {
    fn stored(&self) -> std::result::Result<String, Self::Error>;
}

impl Stored for Graph {
    fn stored(&self) -> algoview_graph::Result<String> {
        self.to_json()
    }
}

impl Stored for Tree {
    fn stored(&self) -> algoview_tree::Result<String> {
        self.to_json()
    }
}

#[derive(Debug)]
pub(crate) struct Tracked<T> {
    value: T,
    history: History<String>,
    key: String,
}

impl<T> Tracked<T>
where
    T: Stored,
    Error: From<T::Error>,
{
    /// Wrap `value` and record it as the first history entry.
    pub(crate) fn new(value: T, capacity: usize, key: impl Into<String>) -> Result<Self> {
        let mut history = History::new(capacity);
        history.push(value.checkpoint()?);
        Ok(Self {
            value,
            history,
            key: key.into(),
        })
    }

    pub(crate) fn value(&self) -> &T {
        &self.value
    }

    pub(crate) fn history(&self) -> &History<String> {
        &self.history
    }

    /// Run `edit` on a copy of the value. If `changed` accepts its result,
    /// save the copy, make it live and push a checkpoint.
    pub(crate) fn edit<S, R, F, C>(&mut self, store: &mut S, edit: F, changed: C) -> Result<R>
    where
        S: StateStore,
        F: FnOnce(&mut T) -> R,
        C: FnOnce(&R) -> bool,
    {
        let mut next = self.value.clone();
        let result = edit(&mut next);
        if changed(&result) {
            let state = next.checkpoint()?;
            store.save(&self.key, &next.stored()?)?;
            self.value = next;
            self.history.push(state);
            debug!(
                "Checkpoint {} of {} for {}",
                self.history.index() + 1,
                self.history.len(),
                self.key
            );
        }
        Ok(result)
    }

    /// Step back one checkpoint. Returns false at the oldest entry.
    pub(crate) fn undo<S: StateStore>(&mut self, store: &mut S) -> Result<bool> {
        if !self.history.can_undo() {
            return Ok(false);
        }
        self.load(self.history.index() - 1, store)?;
        self.history.undo();
        Ok(true)
    }

    /// Step forward one checkpoint. Returns false at the newest entry.
    pub(crate) fn redo<S: StateStore>(&mut self, store: &mut S) -> Result<bool> {
        if !self.history.can_redo() {
            return Ok(false);
        }
        self.load(self.history.index() + 1, store)?;
        self.history.redo();
        Ok(true)
    }

    /// Make history entry `index` live and persist it, leaving everything
    /// untouched on failure.
    fn load<S: StateStore>(&mut self, index: usize, store: &mut S) -> Result<()> {
        let Some(state) = self.history.entries().nth(index) else {
            return Ok(());
        };
        let mut next = self.value.clone();
        next.restore(state)?;
        store.save(&self.key, &next.stored()?)?;
        self.value = next;
        Ok(())
    }
}

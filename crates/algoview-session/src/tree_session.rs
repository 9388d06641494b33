//! Host context for the red-black tree trainer.

use algoview_history::History;
use algoview_tree::{Color, Error as TreeError, NodeId, NodeLayout, RuleReport, Tree};
use tracing::{debug, info};

use crate::config::SessionConfig;
use crate::error::Result;
use crate::store::StateStore;
use crate::tracked::Tracked;

/// What a click did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// The node is now selected.
    Selected(NodeId),
    /// The selection was cleared without editing.
    Cleared,
    /// The selected node was clicked again and changed color.
    Recolored(NodeId, Color),
    /// The selected node and the clicked node were rotated.
    Rotated(NodeId, NodeId),
    /// The two nodes are not parent and child; nothing changed.
    NotAdjacent(NodeId, NodeId),
}

/// Tree, undo history, persistence and pointer state.
#[derive(Debug)]
pub struct TreeSession<S: StateStore> {
    config: SessionConfig,
    store: S,
    tree: Tracked<Tree>,
    hovered: Option<NodeId>,
    selected: Option<NodeId>,
    load_error: Option<TreeError>,
}

impl<S: StateStore> TreeSession<S> {
    /// Open a session, loading the tree saved under `config.tree_key`.
    pub fn open(config: SessionConfig, store: S) -> Result<Self> {
        let (tree, load_error) = match store.load(&config.tree_key)? {
            Some(text) => Tree::from_json_or_empty(&text, config.new_node_color),
            None => (Tree::new(config.new_node_color), None),
        };
        info!("Tree session opened with {} nodes", tree.len());
        let tree = Tracked::new(tree, config.history_capacity, config.tree_key.clone())?;
        Ok(Self {
            config,
            store,
            tree,
            hovered: None,
            selected: None,
            load_error,
        })
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn tree(&self) -> &Tree {
        self.tree.value()
    }

    pub fn history(&self) -> &History<String> {
        self.tree.history()
    }

    pub fn load_error(&self) -> Option<&TreeError> {
        self.load_error.as_ref()
    }

    /// Rule report for the current tree.
    pub fn validate(&self) -> RuleReport {
        self.tree.value().validate()
    }

    /// Placement rows for a renderer.
    pub fn layout(&self) -> Vec<NodeLayout> {
        self.tree.value().layout()
    }

    // --- Editing ---

    pub fn insert(&mut self, value: i64) -> Result<NodeId> {
        self.tree.edit(&mut self.store, |t| t.insert(value), |_| true)
    }

    /// Rotate a parent/child pair, in either order.
    pub fn rotate(&mut self, x: NodeId, y: NodeId) -> Result<()> {
        self.tree.edit(&mut self.store, |t| t.rotate(x, y), |r| r.is_ok())??;
        Ok(())
    }

    pub fn recolor(&mut self, id: NodeId) -> Result<Color> {
        let color = self.tree.edit(&mut self.store, |t| t.recolor(id), |r| r.is_ok())??;
        Ok(color)
    }

    pub fn clear(&mut self) -> Result<()> {
        if self.tree.value().is_empty() {
            return Ok(());
        }
        self.tree.edit(&mut self.store, |t| t.clear(), |_| true)?;
        self.clear_pointer();
        Ok(())
    }

    // --- Pointer state ---

    pub fn hovered(&self) -> Option<NodeId> {
        self.hovered
    }

    /// Set the node under the pointer. Ids not in the tree clear it.
    pub fn hover(&mut self, id: Option<NodeId>) {
        self.hovered = id.filter(|&id| self.tree.value().node(id).is_some());
    }

    pub fn selected(&self) -> Option<NodeId> {
        self.selected
    }

    /// Click on `target`, or on empty space when `None`.
    ///
    /// With nothing selected the target becomes selected. With a selection,
    /// clicking it again recolors it and clicking another node rotates the
    /// pair. Either way the selection is cleared afterwards.
    pub fn click(&mut self, target: Option<NodeId>) -> Result<ClickOutcome> {
        let Some(target) = target else {
            self.selected = None;
            return Ok(ClickOutcome::Cleared);
        };
        if self.tree.value().node(target).is_none() {
            return Err(TreeError::UnknownNode(target).into());
        }

        let Some(selected) = self.selected.take() else {
            self.selected = Some(target);
            debug!("Selected {}", target);
            return Ok(ClickOutcome::Selected(target));
        };

        if selected == target {
            let color = self.recolor(target)?;
            return Ok(ClickOutcome::Recolored(target, color));
        }

        match self.rotate(selected, target) {
            Ok(()) => Ok(ClickOutcome::Rotated(selected, target)),
            Err(crate::Error::Tree(TreeError::NotAdjacent(x, y))) => {
                debug!("Ignoring click: {} and {} are not adjacent", x, y);
                Ok(ClickOutcome::NotAdjacent(x, y))
            }
            Err(e) => Err(e),
        }
    }

    // --- Undo / redo ---

    /// Step back one checkpoint. Returns false at the oldest entry.
    pub fn undo(&mut self) -> Result<bool> {
        let moved = self.tree.undo(&mut self.store)?;
        if moved {
            self.clear_pointer();
        }
        Ok(moved)
    }

    /// Step forward one checkpoint. Returns false at the newest entry.
    pub fn redo(&mut self) -> Result<bool> {
        let moved = self.tree.redo(&mut self.store)?;
        if moved {
            self.clear_pointer();
        }
        Ok(moved)
    }

    // Restores rebuild the arena, so old ids no longer name the same nodes.
    fn clear_pointer(&mut self) {
        self.hovered = None;
        self.selected = None;
    }
}

//! Persisted tree form.
//!
//! ```text
//! { "value": 5, "color": 1, "left": { ... } | null, "right": { ... } | null }
//! ```
//!
//! An empty tree is `null`. Parent links and indices are never written;
//! they are rebuilt after loading. Unknown keys are ignored.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use algoview_history::Checkpoint;

use crate::color::Color;
use crate::error::{Error, Result};
use crate::tree::{NodeId, Side, Tree};

/// One node of the persisted form, owning its subtrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub value: i64,
    pub color: Color,
    #[serde(default)]
    pub left: Option<Box<NodeRecord>>,
    #[serde(default)]
    pub right: Option<Box<NodeRecord>>,
}

impl Tree {
    /// Build the persisted form.
    pub fn to_record(&self) -> Option<NodeRecord> {
        let mut built: Vec<Option<NodeRecord>> = vec![None; self.len()];
        for id in self.preorder().into_iter().rev() {
            let Some(node) = self.node(id) else { continue };
            let mut take = |child: Option<NodeId>| {
                child
                    .and_then(|c| built.get_mut(c.0).and_then(Option::take))
                    .map(Box::new)
            };
            let record = NodeRecord {
                value: node.value(),
                color: node.color(),
                left: take(node.left()),
                right: take(node.right()),
            };
            built[id.0] = Some(record);
        }
        self.root().and_then(|r| built.get_mut(r.0).and_then(Option::take))
    }

    /// Rebuild a tree from its persisted form.
    pub fn from_record(record: Option<NodeRecord>, new_node_color: Color) -> Self {
        let mut tree = Tree::new(new_node_color);
        let mut stack: Vec<(NodeRecord, Option<(NodeId, Side)>)> =
            record.map(|r| (r, None)).into_iter().collect();
        while let Some((record, slot)) = stack.pop() {
            let id = tree.push_node(record.value, record.color);
            tree.attach(slot, id);
            if let Some(right) = record.right {
                stack.push((*right, Some((id, Side::Right))));
            }
            if let Some(left) = record.left {
                stack.push((*left, Some((id, Side::Left))));
            }
        }
        tree.reindex();
        tree
    }

    /// Serialize to the JSON wire format.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.to_record())?)
    }

    /// Parse the JSON wire format.
    pub fn from_json(text: &str, new_node_color: Color) -> Result<Self> {
        let record: Option<NodeRecord> = serde_json::from_str(text)?;
        let tree = Self::from_record(record, new_node_color);
        info!("Loaded tree with {} nodes", tree.len());
        Ok(tree)
    }

    /// Parse the JSON wire format, falling back to an empty tree.
    pub fn from_json_or_empty(text: &str, new_node_color: Color) -> (Self, Option<Error>) {
        match Self::from_json(text, new_node_color) {
            Ok(tree) => (tree, None),
            Err(e) => {
                warn!("Failed to parse tree, starting empty: {}", e);
                (Self::new(new_node_color), Some(e))
            }
        }
    }
}

impl Checkpoint for Tree {
    type Error = Error;

    fn checkpoint(&self) -> Result<String> {
        self.to_json()
    }

    fn restore(&mut self, state: &str) -> Result<()> {
        *self = Self::from_json(state, self.new_node_color())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_tree_is_null() {
        let tree = Tree::default();
        assert_eq!(tree.to_json().unwrap(), "null");
        assert!(Tree::from_json("null", Color::Red).unwrap().is_empty());
    }

    #[test]
    fn persisted_form_has_no_parent() {
        let mut tree = Tree::new(Color::Black);
        tree.insert(2);
        tree.insert(1);
        let json = tree.to_json().unwrap();
        assert_eq!(
            json,
            r#"{"value":2,"color":1,"left":{"value":1,"color":1,"left":null,"right":null},"right":null}"#
        );
        assert!(!json.contains("parent"));
    }

    #[test]
    fn load_rebuilds_derived_links() {
        let text = r#"{"value":5,"color":1,"index":2,
            "left":{"value":3,"color":0,"left":{"value":1,"color":1},"right":null},
            "right":{"value":8,"color":0}}"#;
        let tree = Tree::from_json(text, Color::Red).unwrap();

        assert_eq!(tree.inorder_values(), vec![1, 3, 5, 8]);
        let three = tree.find(3).unwrap();
        let one = tree.find(1).unwrap();
        assert_eq!(tree.node(one).unwrap().parent(), Some(three));
        assert_eq!(tree.node(three).unwrap().index(), 1);
        assert_eq!(tree.node(three).unwrap().color(), Color::Red);
        assert_eq!(tree.depth(one), Some(2));
    }

    #[test]
    fn rotated_tree_round_trips() {
        let mut tree = Tree::default();
        for v in [5, 3, 8, 1, 4] {
            tree.insert(v);
        }
        tree.rotate(tree.find(3).unwrap(), tree.find(5).unwrap()).unwrap();

        let copy = Tree::from_json(&tree.to_json().unwrap(), Color::Red).unwrap();
        assert_eq!(copy.to_record(), tree.to_record());
        assert_eq!(copy.node(copy.root().unwrap()).unwrap().value(), 3);
    }

    #[test]
    fn malformed_input_yields_empty_tree() {
        for text in ["{", r#"{"value":"x","color":0}"#, r#"{"value":1,"color":7}"#] {
            let (tree, error) = Tree::from_json_or_empty(text, Color::Red);
            assert!(tree.is_empty());
            assert!(error.is_some());
        }
    }

    #[test]
    fn checkpoint_restore() {
        let mut tree = Tree::default();
        tree.insert(10);
        let state = tree.checkpoint().unwrap();
        tree.insert(20);
        tree.restore(&state).unwrap();
        assert_eq!(tree.inorder_values(), vec![10]);
    }
}

//! Arena-backed binary search tree.
//!
//! Nodes live in a `Vec` and are addressed by [`NodeId`]. Child links are
//! the source of truth. Parent links, in-order indices and heights are
//! derived by [`Tree::reindex`], which runs after every insert and rotation.
//!
//! All walks use explicit stacks so degenerate chains of any length are
//! safe.

use std::fmt;

use tracing::debug;

use crate::color::{Color, DEFAULT_NEW_NODE_COLOR};
use crate::error::{Error, Result};

/// Stable handle to a node in a [`Tree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which child slot of a parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// A node and its derived bookkeeping.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode {
    value: i64,
    color: Color,
    left: Option<NodeId>,
    right: Option<NodeId>,
    parent: Option<NodeId>,
    index: usize,
    height: usize,
}

impl TreeNode {
    fn leaf(value: i64, color: Color) -> Self {
        Self {
            value,
            color,
            left: None,
            right: None,
            parent: None,
            index: 0,
            height: 1,
        }
    }

    pub fn value(&self) -> i64 {
        self.value
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn left(&self) -> Option<NodeId> {
        self.left
    }

    pub fn right(&self) -> Option<NodeId> {
        self.right
    }

    /// Derived parent link.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// 0-based position in an in-order walk.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Height of the subtree rooted here (a leaf has height 1).
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn child(&self, side: Side) -> Option<NodeId> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }
}

/// Placement data for drawing one node.
///
/// A renderer places node `i` of `n` at `(index + 1) / (n + 1)` across and
/// `depth` rows down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeLayout {
    pub id: NodeId,
    pub value: i64,
    pub color: Color,
    pub index: usize,
    pub depth: usize,
}

/// An unbalanced binary search tree with colored nodes.
#[derive(Debug, Clone)]
pub struct Tree {
    nodes: Vec<TreeNode>,
    root: Option<NodeId>,
    new_node_color: Color,
}

impl Default for Tree {
    fn default() -> Self {
        Self::new(DEFAULT_NEW_NODE_COLOR)
    }
}

impl Tree {
    /// Create an empty tree whose inserted nodes get `new_node_color`.
    pub fn new(new_node_color: Color) -> Self {
        Self {
            nodes: Vec::new(),
            root: None,
            new_node_color,
        }
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn new_node_color(&self) -> Color {
        self.new_node_color
    }

    pub fn set_new_node_color(&mut self, color: Color) {
        self.new_node_color = color;
    }

    pub fn node(&self, id: NodeId) -> Option<&TreeNode> {
        self.nodes.get(id.0)
    }

    fn get(&self, id: NodeId) -> Result<&TreeNode> {
        self.nodes.get(id.0).ok_or(Error::UnknownNode(id))
    }

    /// Remove every node.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }

    /// First node holding `value` in search order.
    pub fn find(&self, value: i64) -> Option<NodeId> {
        let mut cursor = self.root;
        while let Some(id) = cursor {
            let node = &self.nodes[id.0];
            if value == node.value {
                return Some(id);
            }
            cursor = if value < node.value { node.left } else { node.right };
        }
        None
    }

    pub(crate) fn push_node(&mut self, value: i64, color: Color) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(TreeNode::leaf(value, color));
        id
    }

    pub(crate) fn attach(&mut self, parent: Option<(NodeId, Side)>, child: NodeId) {
        match parent {
            None => self.root = Some(child),
            Some((p, Side::Left)) => self.nodes[p.0].left = Some(child),
            Some((p, Side::Right)) => self.nodes[p.0].right = Some(child),
        }
    }

    /// Insert `value` as a new leaf.
    ///
    /// Smaller values go left, equal or larger go right. The tree is not
    /// rebalanced.
    pub fn insert(&mut self, value: i64) -> NodeId {
        let mut slot = None;
        let mut cursor = self.root;
        while let Some(id) = cursor {
            let node = &self.nodes[id.0];
            let side = if value < node.value { Side::Left } else { Side::Right };
            slot = Some((id, side));
            cursor = node.child(side);
        }

        let id = self.push_node(value, self.new_node_color);
        self.attach(slot, id);
        self.reindex();
        debug!("Inserted {} as {}", value, id);
        id
    }

    /// Rotate the parent/child pair `x`, `y`.
    ///
    /// Either order is accepted. After the rotation the former child takes
    /// the former parent's place, and the former parent becomes its child.
    /// The pair is checked before any link is touched.
    pub fn rotate(&mut self, x: NodeId, y: NodeId) -> Result<()> {
        let (x_node, y_node) = (self.get(x)?, self.get(y)?);

        // Normalize so that `y` is the parent.
        let (x, y) = if y_node.parent == Some(x) {
            (y, x)
        } else if x_node.parent == Some(y) {
            (x, y)
        } else {
            return Err(Error::NotAdjacent(x, y));
        };

        let grandparent = self.nodes[y.0].parent;
        match grandparent {
            None => self.root = Some(x),
            Some(p) => {
                let p = &mut self.nodes[p.0];
                if p.left == Some(y) {
                    p.left = Some(x);
                } else {
                    p.right = Some(x);
                }
            }
        }

        if self.nodes[y.0].left == Some(x) {
            // Right rotation
            let inner = self.nodes[x.0].right;
            self.nodes[x.0].right = Some(y);
            self.nodes[y.0].left = inner;
        } else {
            // Left rotation
            let inner = self.nodes[x.0].left;
            self.nodes[x.0].left = Some(y);
            self.nodes[y.0].right = inner;
        }

        self.reindex();
        debug!("Rotated {} above {}", x, y);
        Ok(())
    }

    /// Flip the color of `id`.
    pub fn recolor(&mut self, id: NodeId) -> Result<Color> {
        self.get(id)?;
        let node = &mut self.nodes[id.0];
        node.color = node.color.flipped();
        Ok(node.color)
    }

    /// Recompute parent links, in-order indices and subtree heights.
    pub fn reindex(&mut self) {
        let preorder = self.preorder();

        if let Some(root) = self.root {
            self.nodes[root.0].parent = None;
        }
        for &id in &preorder {
            let (left, right) = (self.nodes[id.0].left, self.nodes[id.0].right);
            for child in [left, right].into_iter().flatten() {
                self.nodes[child.0].parent = Some(id);
            }
        }

        for (position, id) in self.inorder().into_iter().enumerate() {
            self.nodes[id.0].index = position;
        }

        // Children come after their parent in pre-order, so a reverse walk
        // sees every child first.
        for &id in preorder.iter().rev() {
            let node = &self.nodes[id.0];
            let height_of = |child: Option<NodeId>| child.map_or(0, |c| self.nodes[c.0].height);
            let height = 1 + height_of(node.left).max(height_of(node.right));
            self.nodes[id.0].height = height;
        }
    }

    /// Node ids in pre-order (node, left, right).
    pub fn preorder(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<NodeId> = self.root.into_iter().collect();
        while let Some(id) = stack.pop() {
            order.push(id);
            let node = &self.nodes[id.0];
            stack.extend(node.right);
            stack.extend(node.left);
        }
        order
    }

    /// Node ids in in-order (left, node, right).
    pub fn inorder(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = Vec::new();
        let mut cursor = self.root;
        loop {
            while let Some(id) = cursor {
                stack.push(id);
                cursor = self.nodes[id.0].left;
            }
            let Some(id) = stack.pop() else { break };
            order.push(id);
            cursor = self.nodes[id.0].right;
        }
        order
    }

    /// Values in in-order.
    pub fn inorder_values(&self) -> Vec<i64> {
        self.inorder()
            .into_iter()
            .map(|id| self.nodes[id.0].value)
            .collect()
    }

    /// Number of edges between `id` and the root.
    pub fn depth(&self, id: NodeId) -> Option<usize> {
        let mut node = self.node(id)?;
        let mut depth = 0;
        while let Some(parent) = node.parent {
            node = &self.nodes[parent.0];
            depth += 1;
        }
        Some(depth)
    }

    /// Height of the whole tree (0 when empty).
    pub fn height(&self) -> usize {
        self.root.map_or(0, |r| self.nodes[r.0].height)
    }

    /// Placement rows for every node, in in-order.
    pub fn layout(&self) -> Vec<NodeLayout> {
        let mut depths = vec![0; self.nodes.len()];
        let mut stack: Vec<(NodeId, usize)> = self.root.map(|r| (r, 0)).into_iter().collect();
        while let Some((id, depth)) = stack.pop() {
            depths[id.0] = depth;
            let node = &self.nodes[id.0];
            for child in [node.left, node.right].into_iter().flatten() {
                stack.push((child, depth + 1));
            }
        }

        self.inorder()
            .into_iter()
            .map(|id| {
                let node = &self.nodes[id.0];
                NodeLayout {
                    id,
                    value: node.value,
                    color: node.color,
                    index: node.index,
                    depth: depths[id.0],
                }
            })
            .collect()
    }
}

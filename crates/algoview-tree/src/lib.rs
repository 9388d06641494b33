//! Algoview Tree
//!
//! A binary search tree that a user reshapes by hand. Insertion places a
//! plain leaf; rotations and recolors are explicit requests; the red-black
//! rules are only ever *checked*.
//!
//! # Storage
//!
//! Nodes live in an arena and are addressed by [`NodeId`]. Child links are
//! owned data; parent links, in-order indices and subtree heights are
//! derived after every structural change and never persisted.
//!
//! # Rules
//!
//! [`Tree::validate`] reports the three red-black rules independently:
//! black root, no red-red parent/child, equal black height on every path.

mod color;
mod error;
mod rules;
mod tree;
mod wire;

pub use color::{Color, DEFAULT_NEW_NODE_COLOR};
pub use error::{Error, Result};
pub use rules::{Rule, RuleReport};
pub use tree::{NodeId, NodeLayout, Side, Tree, TreeNode};
pub use wire::NodeRecord;

//! Red-black rule checks.
//!
//! The tree never enforces these rules. They are evaluated on demand and
//! reported independently so a host can show which ones currently hold.
//!
//! 1. The root is black.
//! 2. A red node never has a red child.
//! 3. Every path from the root down to an empty child slot passes the same
//!    number of black nodes (empty slots count as black).

use serde::{Deserialize, Serialize};

use crate::tree::{NodeId, Tree};

/// The three red-black rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rule {
    RootBlack,
    NoRedRed,
    EqualBlackHeight,
}

impl Rule {
    pub fn description(&self) -> &'static str {
        match self {
            Rule::RootBlack => "the root is black",
            Rule::NoRedRed => "a red node has no red child",
            Rule::EqualBlackHeight => "every root-to-leaf path has the same number of black nodes",
        }
    }
}

/// Outcome of each rule, evaluated independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleReport {
    pub root_black: bool,
    pub no_red_red: bool,
    pub equal_black_height: bool,
}

impl RuleReport {
    /// Whether `rule` holds.
    pub fn holds(&self, rule: Rule) -> bool {
        match rule {
            Rule::RootBlack => self.root_black,
            Rule::NoRedRed => self.no_red_red,
            Rule::EqualBlackHeight => self.equal_black_height,
        }
    }

    /// True if all three rules hold.
    pub fn is_valid(&self) -> bool {
        self.root_black && self.no_red_red && self.equal_black_height
    }

    /// Rules that do not hold.
    pub fn violations(&self) -> Vec<Rule> {
        [Rule::RootBlack, Rule::NoRedRed, Rule::EqualBlackHeight]
            .into_iter()
            .filter(|&rule| !self.holds(rule))
            .collect()
    }
}

impl Tree {
    /// Evaluate all three rules. An empty tree satisfies each of them.
    pub fn validate(&self) -> RuleReport {
        RuleReport {
            root_black: self.root_black(),
            no_red_red: self.no_red_red(),
            equal_black_height: self.black_height().is_some(),
        }
    }

    fn root_black(&self) -> bool {
        self.root()
            .and_then(|r| self.node(r))
            .map_or(true, |n| n.color().is_black())
    }

    fn no_red_red(&self) -> bool {
        !self.preorder().into_iter().any(|id| {
            let Some(node) = self.node(id) else { return false };
            node.color().is_red()
                && [node.left(), node.right()]
                    .into_iter()
                    .flatten()
                    .filter_map(|child| self.node(child))
                    .any(|child| child.color().is_red())
        })
    }

    /// Black count shared by every root-to-empty-slot path, if they agree.
    ///
    /// The count excludes the implicit black of the empty slot itself. An
    /// empty tree has black height 0.
    pub fn black_height(&self) -> Option<usize> {
        let Some(root) = self.root() else {
            return Some(0);
        };

        let mut expected = None;
        let mut stack: Vec<(NodeId, usize)> = vec![(root, 0)];
        while let Some((id, above)) = stack.pop() {
            let node = self.node(id)?;
            let blacks = above + usize::from(node.color().is_black());
            for child in [node.left(), node.right()] {
                match child {
                    Some(c) => stack.push((c, blacks)),
                    None => match expected {
                        None => expected = Some(blacks),
                        Some(e) if e != blacks => return None,
                        Some(_) => {}
                    },
                }
            }
        }
        expected
    }
}

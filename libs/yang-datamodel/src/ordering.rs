//! Priority ordering of sibling nodes
//!
//! Higher priority sorts first. Equal priorities compare equal, so stable sorts
//! keep insertion order among them.

use crate::node::{NodeId, SchemaNode};
use crate::tree::SchemaTree;
use std::cmp::Ordering;

/// Descending priority comparison
pub fn compare_priority(node: &SchemaNode, other: &SchemaNode) -> Ordering {
    other.priority().cmp(&node.priority())
}

impl SchemaTree {
    /// Compare two nodes by priority, higher priority first
    ///
    /// # Panics
    ///
    /// Panics if either handle was not issued by this tree, like indexing.
    pub fn compare(&self, node: NodeId, other: NodeId) -> Ordering {
        compare_priority(&self[node], &self[other])
    }

    /// Children of `parent` ordered by descending priority, ties in insertion order
    pub fn children_by_priority(&self, parent: NodeId) -> Vec<NodeId> {
        let mut children: Vec<NodeId> = self.children(parent).collect();
        children.sort_by(|&a, &b| self.compare(a, b));
        children
    }
}

//! Grouping expansion
//!
//! A grouping is a template: each uses site receives an independent deep copy of
//! the grouping's content. The copy is built by an iterative walk driven by a
//! three-state [`Traversal`] automaton, so schema depth is bounded by memory and
//! not by the call stack.
//!
//! The caller clones and links the two roots (grouping root and uses-site root);
//! [`GroupingExpander::clone_subtree`] copies everything beneath them.

use crate::clone::UsesContext;
use crate::error::{Error, Result, StructuralError};
use crate::kind::NodeKind;
use crate::node::NodeId;
use crate::tree::SchemaTree;
use std::collections::HashMap;

/// How the walk reached the current source node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Traversal {
    /// First child of the previous node
    Descend,
    /// Next sibling of the previous node
    Sibling,
    /// Parent of the previous node; already copied
    Ascend,
}

/// Summary of one subtree clone
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExpansionReport {
    pub nodes_cloned: usize,
    pub bindings_rebound: usize,
}

/// Source-to-copy bookkeeping for one expansion
#[derive(Default)]
struct CopyMap {
    copies: HashMap<NodeId, NodeId>,
    /// Copies in creation order
    cloned: Vec<NodeId>,
}

impl CopyMap {
    fn record(&mut self, source: NodeId, copy: NodeId) {
        self.copies.insert(source, copy);
        self.cloned.push(copy);
    }
}

pub struct GroupingExpander<'t> {
    tree: &'t mut SchemaTree,
}

impl<'t> GroupingExpander<'t> {
    pub fn new(tree: &'t mut SchemaTree) -> Self {
        Self { tree }
    }

    /// Deep-copy the subtree below `src_root` under `dst_root`.
    ///
    /// Children keep their source order. Every node is checked for a name
    /// collision with the siblings it would join before it is copied; the first
    /// definition wins. Once the whole subtree is copied, leaf type bindings into
    /// the source subtree are rebound to the copies, wherever in the subtree the
    /// bound definition lives.
    pub fn clone_subtree(
        &mut self,
        src_root: NodeId,
        dst_root: NodeId,
        ctx: &UsesContext,
    ) -> Result<ExpansionReport> {
        tracing::debug!(
            grouping = %self.tree.path(src_root),
            uses = %self.tree.path(dst_root),
            "Expanding grouping"
        );

        let mut map = CopyMap::default();
        map.copies.insert(src_root, dst_root);
        let mut report = ExpansionReport::default();

        let Some(first) = self.tree.node(src_root)?.first_child() else {
            return Ok(report);
        };

        let mut source = first;
        let mut dest = dst_root;
        let mut traversal = Traversal::Descend;

        while source != src_root {
            if traversal == Traversal::Ascend {
                dest = self.tree.node(dest)?.parent().ok_or_else(|| {
                    Error::InternalInvariant(
                        "cloning failed, destination tree null pointer reached".into(),
                    )
                })?;
            } else {
                self.detect_collision_while_cloning(dest, source, traversal)?;
                let new_node = self.tree.clone_node(source, ctx)?;

                if traversal == Traversal::Descend {
                    self.tree.add_child(dest, new_node)?;
                } else {
                    self.tree.add_next_sibling(dest, new_node)?;
                }
                tracing::trace!(node = %self.tree[new_node].identifier(), "Cloned schema node");

                map.record(source, new_node);
                report.nodes_cloned += 1;
                dest = new_node;
            }

            let current = self.tree.node(source)?;
            match (traversal, current.first_child(), current.next_sibling()) {
                (Traversal::Descend | Traversal::Sibling, Some(child), _) => {
                    traversal = Traversal::Descend;
                    source = child;
                }
                (_, _, Some(sibling)) => {
                    traversal = Traversal::Sibling;
                    source = sibling;
                }
                _ => {
                    traversal = Traversal::Ascend;
                    source = current.parent().ok_or_else(|| {
                        Error::InternalInvariant(
                            "cloning failed, source tree null pointer reached".into(),
                        )
                    })?;
                }
            }
        }

        if self.tree.node(dest)?.parent() != Some(dst_root) {
            return Err(Error::InternalInvariant(format!(
                "cloning ended below '{}' instead of the destination root",
                self.tree[dest].name()
            )));
        }
        self.rebind_types(&map, &mut report)?;

        tracing::debug!(
            nodes = report.nodes_cloned,
            rebound = report.bindings_rebound,
            "Expanded grouping"
        );
        Ok(report)
    }

    /// Check the name of `source` against the siblings its copy would join
    fn detect_collision_while_cloning(
        &self,
        current: NodeId,
        source: NodeId,
        traversal: Traversal,
    ) -> Result<()> {
        let holder = match traversal {
            Traversal::Descend => current,
            Traversal::Sibling => self.tree.node(current)?.parent().ok_or_else(|| {
                Error::InternalInvariant(format!(
                    "sibling '{}' has no parent to check collisions against",
                    self.tree[current].name()
                ))
            })?,
            Traversal::Ascend => {
                return Err(Error::InternalInvariant("errored tree cloning".into()))
            }
        };

        let node = self.tree.node(source)?;
        // kindless nodes are rejected by the clone itself
        let Some(kind) = node.kind() else {
            return Ok(());
        };
        self.tree
            .detect_colliding_child_at(holder, node.name(), kind, node.position())
    }

    /// Point copied leaf types at the copied definitions
    fn rebind_types(&mut self, map: &CopyMap, report: &mut ExpansionReport) -> Result<()> {
        for &leaf in &map.cloned {
            let Some(bound) = self
                .tree
                .node(leaf)?
                .data()
                .and_then(|data| data.leaf_type())
                .and_then(|leaf_type| leaf_type.resolved)
            else {
                continue;
            };

            let rebound = match map.copies.get(&bound) {
                Some(&copy) => copy,
                None if self.tree.node(bound)?.kind().is_some_and(NodeKind::is_type_definition) => {
                    let holder = self.tree.node(leaf)?.parent();
                    return Err(Error::clone_failure(Error::NotFound {
                        name: self.tree[bound].name().to_string(),
                        parent: holder
                            .map(|holder| self.tree[holder].name().to_string())
                            .unwrap_or_default(),
                    }));
                }
                // shared definitions outside the grouping stay shared
                None => continue,
            };

            if let Some(leaf_type) = self
                .tree
                .node_mut(leaf)?
                .data_mut()
                .and_then(|data| data.leaf_type_mut())
            {
                leaf_type.resolved = Some(rebound);
                report.bindings_rebound += 1;
            }
        }
        Ok(())
    }
}

impl SchemaTree {
    /// Fail if `holder` already has a child named `name`, whatever its kind
    pub fn detect_colliding_child(&self, holder: NodeId, name: &str, kind: NodeKind) -> Result<()> {
        self.detect_colliding_child_at(holder, name, kind, None)
    }

    pub(crate) fn detect_colliding_child_at(
        &self,
        holder: NodeId,
        name: &str,
        kind: NodeKind,
        position: Option<crate::node::SourcePosition>,
    ) -> Result<()> {
        let holder_node = self.node(holder)?;
        if !holder_node.kind().is_some_and(NodeKind::is_collision_detector) {
            return Err(StructuralError::CollisionDetectionUnsupported.into());
        }

        if self.find_child(holder, name).is_some() {
            return Err(Error::NameCollision {
                name: name.to_string(),
                parent: holder_node.name().to_string(),
                kind,
                position,
            });
        }
        Ok(())
    }
}

//! Linking pass driver
//!
//! Walks a subtree top-down and runs
//! [`assign_namespace_and_register`](SchemaTree::assign_namespace_and_register)
//! semantics on every node. Root namespaces must already be defined.

use crate::error::Result;
use crate::kind::NodeKind;
use crate::node::NodeId;
use crate::tree::SchemaTree;
use serde::Deserialize;

/// What to do when a node cannot be registered with its parent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RegistrationPolicy {
    /// Abort linking with the registration error
    #[default]
    Strict,
    /// Log the failure and keep linking; the child stays unregistered
    BestEffort,
}

/// Configuration for the linking pass
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LinkerConfig {
    pub registration: RegistrationPolicy,
}

impl LinkerConfig {
    pub fn from_value(value: &serde_json::Value) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_value(value.clone())
    }
}

/// Summary of one linking run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkReport {
    pub nodes_linked: usize,
    pub registrations_skipped: usize,
}

#[derive(Debug, Clone, Default)]
pub struct Linker {
    config: LinkerConfig,
}

impl Linker {
    pub fn new(config: LinkerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LinkerConfig {
        &self.config
    }

    /// Link `root` and every node below it
    pub fn link(&self, tree: &mut SchemaTree, root: NodeId) -> Result<LinkReport> {
        let policy = self.config.registration;
        tracing::debug!(root = %tree.path(root), ?policy, "Linking schema subtree");

        let mut report = LinkReport::default();
        let mut order = vec![root];
        order.extend(tree.descendants(root));

        for id in order {
            if id != root && is_linked_by_holder(tree, id) {
                // registered by the holder's own step
                report.nodes_linked += 1;
                continue;
            }
            report.registrations_skipped += tree.link_node(id, policy)?;
            report.nodes_linked += 1;
            tracing::trace!(node = %tree[id].identifier(), "Linked schema node");
        }

        tracing::debug!(
            nodes = report.nodes_linked,
            skipped = report.registrations_skipped,
            "Linked schema subtree"
        );
        Ok(report)
    }
}

fn is_linked_by_holder(tree: &SchemaTree, id: NodeId) -> bool {
    let node = &tree[id];
    node.kind().is_some_and(NodeKind::is_leaf_like)
        && node
            .parent()
            .is_some_and(|parent| tree[parent].is_leaves_holder())
}

//! Declarative node outlines
//!
//! A [`NodeOutline`] describes a bare subtree in JSON: each entry names a node,
//! its `kind` and kind-specific fields, and its children. Outlines are how test
//! fixtures and lightweight front ends hand a forest to the tree without a full
//! YANG parser.
//!
//! ```rust
//! use arbor_datamodel::{NodeOutline, SchemaTree};
//! use serde_json::json;
//!
//! let outline = NodeOutline::from_value(&json!({
//!     "name": "m",
//!     "kind": "module",
//!     "namespace": "urn:example",
//!     "children": [
//!         { "name": "c", "kind": "container", "children": [
//!             { "name": "l", "kind": "leaf", "type": { "name": "string" } }
//!         ]}
//!     ]
//! }))
//! .unwrap();
//!
//! let mut tree = SchemaTree::new();
//! let root = outline.build_into(&mut tree).unwrap();
//! assert_eq!(tree.descendants(root).count(), 2);
//! ```

use crate::data::NodeData;
use crate::error::{Error, Result};
use crate::node::{NodeId, SchemaNode, SourcePosition};
use crate::tree::SchemaTree;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, Deserialize)]
pub struct NodeOutline {
    pub name: String,
    #[serde(default)]
    pub namespace: Option<String>,
    #[serde(default)]
    pub priority: i32,
    #[serde(default = "default_translate")]
    pub translate: bool,
    #[serde(default)]
    pub position: Option<SourcePosition>,
    #[serde(flatten)]
    pub data: NodeData,
    #[serde(default)]
    pub children: Vec<NodeOutline>,
}

fn default_translate() -> bool {
    true
}

impl NodeOutline {
    pub fn from_value(value: &Value) -> Result<Self> {
        serde_json::from_value(value.clone()).map_err(|e| Error::InvalidOutline(e.to_string()))
    }

    fn to_node(&self) -> SchemaNode {
        let mut node = SchemaNode::new(&self.name, self.data.clone()).with_priority(self.priority);
        if let Some(namespace) = &self.namespace {
            node = node.with_namespace(namespace);
        }
        if let Some(position) = self.position {
            node = node.with_position(position);
        }
        node.set_translate(self.translate);
        node
    }

    /// Allocate and link the outlined subtree; returns the new root.
    ///
    /// Leaf types naming an inline `definition` are bound to the sibling
    /// union/enumeration node of that name.
    pub fn build_into(&self, tree: &mut SchemaTree) -> Result<NodeId> {
        let root = tree.alloc(self.to_node())?;
        let mut pending: Vec<(&NodeOutline, NodeId)> =
            self.children.iter().rev().map(|child| (child, root)).collect();
        let mut created = vec![root];

        while let Some((outline, parent)) = pending.pop() {
            let id = tree.alloc(outline.to_node())?;
            tree.add_child(parent, id)?;
            created.push(id);
            pending.extend(outline.children.iter().rev().map(|child| (child, id)));
        }

        for id in created {
            bind_inline_definition(tree, id)?;
        }
        Ok(root)
    }
}

fn bind_inline_definition(tree: &mut SchemaTree, leaf: NodeId) -> Result<()> {
    let Some(definition) = tree[leaf]
        .data()
        .and_then(|data| data.leaf_type())
        .and_then(|leaf_type| leaf_type.definition.clone())
    else {
        return Ok(());
    };

    let parent = tree[leaf].parent().ok_or_else(|| Error::NotFound {
        name: definition.clone(),
        parent: tree[leaf].name().to_string(),
    })?;
    let bound = tree
        .children(parent)
        .find(|&sibling| {
            tree[sibling].name() == definition
                && tree[sibling].kind().is_some_and(|k| k.is_type_definition())
        })
        .ok_or_else(|| Error::NotFound {
            name: definition.clone(),
            parent: tree[parent].name().to_string(),
        })?;

    if let Some(leaf_type) = tree[leaf].data_mut().and_then(|data| data.leaf_type_mut()) {
        leaf_type.resolved = Some(bound);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::NodeKind;
    use serde_json::json;

    #[test]
    fn test_build_preserves_order_and_attributes() {
        let outline = NodeOutline::from_value(&json!({
            "name": "g",
            "kind": "grouping",
            "children": [
                { "name": "a", "kind": "leaf", "priority": 2, "position": { "line": 3, "column": 5 } },
                { "name": "b", "kind": "list", "keys": ["id"], "minElements": 1, "translate": false,
                  "children": [{ "name": "id", "kind": "leaf" }] },
                { "name": "c", "kind": "leaf-list" }
            ]
        }))
        .unwrap();

        let mut tree = SchemaTree::new();
        let root = outline.build_into(&mut tree).unwrap();

        let names: Vec<&str> = tree.children(root).map(|c| tree[c].name()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);

        let a = tree.find_child(root, "a").unwrap();
        assert_eq!(tree[a].priority(), 2);
        assert_eq!(tree[a].position(), Some(SourcePosition::new(3, 5)));

        let b = tree.find_child(root, "b").unwrap();
        assert_eq!(tree[b].kind(), Some(NodeKind::List));
        assert!(!tree[b].is_translated());
        assert!(tree[b].data().unwrap().is_mandatory());
        assert!(tree.find_child(b, "id").is_some());
    }

    #[test]
    fn test_inline_definition_is_bound() {
        let outline = NodeOutline::from_value(&json!({
            "name": "c",
            "kind": "container",
            "children": [
                { "name": "speed", "kind": "leaf", "type": { "name": "enumeration", "definition": "speed-enum" } },
                { "name": "speed-enum", "kind": "enumeration", "values": [{ "name": "fast", "value": 1 }] }
            ]
        }))
        .unwrap();

        let mut tree = SchemaTree::new();
        let root = outline.build_into(&mut tree).unwrap();
        let speed = tree.find_child(root, "speed").unwrap();
        let speed_enum = tree.find_child(root, "speed-enum").unwrap();
        assert_eq!(tree[speed].leaf().unwrap().leaf_type.resolved, Some(speed_enum));
    }

    #[test]
    fn test_missing_definition_is_not_found() {
        let outline = NodeOutline::from_value(&json!({
            "name": "c",
            "kind": "container",
            "children": [
                { "name": "speed", "kind": "leaf", "type": { "name": "union", "definition": "nope" } }
            ]
        }))
        .unwrap();

        let mut tree = SchemaTree::new();
        let err = outline.build_into(&mut tree).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        let err = NodeOutline::from_value(&json!({ "name": "x", "kind": "anydata" })).unwrap_err();
        assert!(matches!(err, Error::InvalidOutline(_)));
    }
}

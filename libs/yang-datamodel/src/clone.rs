//! Node-level cloning for grouping instantiation

use crate::data::LeafOrigin;
use crate::error::{Error, Result, StructuralError};
use crate::node::NodeId;
use crate::tree::SchemaTree;

/// The "uses" instantiation a clone is made for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UsesContext {
    uses: NodeId,
    grouping: NodeId,
}

impl UsesContext {
    pub fn new(uses: NodeId, grouping: NodeId) -> Self {
        Self { uses, grouping }
    }

    /// The uses statement being expanded
    pub fn uses(&self) -> NodeId {
        self.uses
    }

    /// The grouping the uses statement refers to
    pub fn grouping(&self) -> NodeId {
        self.grouping
    }
}

impl SchemaTree {
    /// Copy one node for the instantiation described by `ctx`.
    ///
    /// All kind-specific fields are copied by value. Leaf copies record the
    /// source leaf and the uses site; their type bindings still point at the
    /// source definitions until the expander rebinds them. The copy has no links
    /// and an empty registry.
    pub fn clone_node(&mut self, id: NodeId, ctx: &UsesContext) -> Result<NodeId> {
        self.detached_clone(id, ctx).map_err(Error::clone_failure)
    }

    fn detached_clone(&mut self, id: NodeId, ctx: &UsesContext) -> Result<NodeId> {
        let source = self.node(id)?;
        let kind = source.kind().ok_or(StructuralError::UnsetKind)?;
        if !kind.is_clonable() {
            return Err(StructuralError::CloneNotSupported(kind).into());
        }

        let mut copy = source.detached_copy();
        if kind.is_leaf_like() {
            if let Some(data) = copy.data_mut() {
                data.set_leaf_origin(LeafOrigin {
                    referred_leaf: id,
                    added_by_uses: ctx.uses(),
                });
            }
        }
        self.alloc(copy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{
        GroupingData, LeafData, LeafType, ModuleData, NodeData, UsesData,
    };
    use crate::node::SchemaNode;

    fn context(tree: &mut SchemaTree) -> UsesContext {
        let grouping = tree.alloc(SchemaNode::new(
            "g",
            NodeData::Grouping(GroupingData::default()),
        )).unwrap();
        let uses = tree.alloc(SchemaNode::new(
            "g",
            NodeData::Uses(UsesData {
                grouping: "g".into(),
            }),
        )).unwrap();
        UsesContext::new(uses, grouping)
    }

    #[test]
    fn test_leaf_clone_is_independent() {
        let mut tree = SchemaTree::new();
        let ctx = context(&mut tree);
        let leaf = tree.alloc(SchemaNode::new(
            "a",
            NodeData::Leaf(LeafData {
                leaf_type: LeafType::named("uint8"),
                default: Some("1".into()),
                ..Default::default()
            }),
        )).unwrap();
        tree.add_child(ctx.grouping(), leaf).unwrap();

        let copy = tree.clone_node(leaf, &ctx).unwrap();
        assert_ne!(copy, leaf);
        assert!(tree[copy].is_atomic());

        tree[copy].leaf_mut().unwrap().default = Some("2".into());
        assert_eq!(tree[leaf].leaf().unwrap().default.as_deref(), Some("1"));

        let origin = tree[copy].leaf().unwrap().origin.unwrap();
        assert_eq!(origin.referred_leaf, leaf);
        assert_eq!(origin.added_by_uses, ctx.uses());
        assert!(tree[leaf].leaf().unwrap().origin.is_none());
    }

    #[test]
    fn test_module_cannot_be_cloned() {
        let mut tree = SchemaTree::new();
        let ctx = context(&mut tree);
        let module = tree.alloc(SchemaNode::new("m", NodeData::Module(ModuleData::default()))).unwrap();

        let err = tree.clone_node(module, &ctx).unwrap_err();
        assert!(err.is_clone());
        assert_eq!(
            err.clone_cause(),
            Some(&Error::Structural(StructuralError::CloneNotSupported(
                crate::NodeKind::Module
            )))
        );
    }

    #[test]
    fn test_abstract_node_clone_fails() {
        let mut tree = SchemaTree::new();
        let ctx = context(&mut tree);
        let bare = tree.alloc(SchemaNode::abstract_node("x")).unwrap();
        assert!(tree.clone_node(bare, &ctx).unwrap_err().is_clone());
    }
}

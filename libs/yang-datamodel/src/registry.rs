//! Child registry and namespace linking
//!
//! Every node that can hold named children keeps a map from
//! [`SchemaNodeIdentifier`] to a [`SchemaNodeContextInfo`] pointing at the child.
//! The linking pass fills these maps top-down once root namespaces are known.

use crate::error::{Error, Result, StructuralError};
use crate::identifier::SchemaNodeIdentifier;
use crate::kind::{NodeKind, RegistryBehavior};
use crate::linker::RegistrationPolicy;
use crate::node::NodeId;
use crate::tree::SchemaTree;

/// Context record stored in a parent's child registry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaNodeContextInfo {
    schema_node: NodeId,
}

impl SchemaNodeContextInfo {
    pub fn new(schema_node: NodeId) -> Self {
        Self { schema_node }
    }

    pub fn schema_node(&self) -> NodeId {
        self.schema_node
    }
}

impl SchemaTree {
    fn holder_kind(&self, holder: NodeId) -> Result<NodeKind> {
        self.node(holder)?
            .kind()
            .ok_or(Error::Structural(StructuralError::UnsetKind))
    }

    /// Record `info` under `identifier` in the child registry of `holder`.
    ///
    /// Re-adding the same node under the same identifier is a no-op; a different
    /// node under an existing identifier is a name collision.
    pub fn add_to_child_registry(
        &mut self,
        holder: NodeId,
        identifier: SchemaNodeIdentifier,
        info: SchemaNodeContextInfo,
    ) -> Result<()> {
        match self.holder_kind(holder)?.registry_behavior() {
            RegistryBehavior::Reject => {
                Err(StructuralError::LeafCannotHoldChildren.into())
            }
            RegistryBehavior::Ignore => Ok(()),
            RegistryBehavior::Accumulate => {
                let existing = self.node(holder)?.child_registry.get(&identifier).copied();
                match existing {
                    Some(existing) if existing == info => Ok(()),
                    Some(_) => {
                        let new = self.node(info.schema_node())?;
                        Err(Error::NameCollision {
                            name: identifier.name().to_string(),
                            parent: self.node(holder)?.name().to_string(),
                            kind: new.kind().ok_or(StructuralError::UnsetKind)?,
                            position: new.position(),
                        })
                    }
                    None => {
                        self.node_mut(holder)?
                            .child_registry
                            .insert(identifier, info);
                        Ok(())
                    }
                }
            }
        }
    }

    /// Record a node carrying a default value; ignored by kinds without a registry
    pub fn add_to_default_child_map(
        &mut self,
        holder: NodeId,
        identifier: SchemaNodeIdentifier,
        node: NodeId,
    ) -> Result<()> {
        if self.holder_kind(holder)?.registry_behavior() == RegistryBehavior::Accumulate {
            self.node_mut(holder)?
                .default_child_map
                .insert(identifier, node);
        }
        Ok(())
    }

    pub fn increment_mandatory_child_count(&mut self, holder: NodeId) -> Result<()> {
        if self.holder_kind(holder)?.registry_behavior() == RegistryBehavior::Accumulate {
            self.node_mut(holder)?.mandatory_child_count += 1;
        }
        Ok(())
    }

    /// Look up a registered child of `holder`
    pub fn get_child_schema(
        &self,
        holder: NodeId,
        identifier: &SchemaNodeIdentifier,
    ) -> Result<&SchemaNodeContextInfo> {
        let node = self.node(holder)?;
        node.child_registry
            .get(identifier)
            .ok_or_else(|| Error::NotFound {
                name: identifier.name().to_string(),
                parent: node.name().to_string(),
            })
    }

    /// Register an arbitrary node in the registry of `holder` under `(name, namespace)`.
    ///
    /// Resolvers use this to expose nodes whose structural parent is not a data
    /// node (choice and case content, for example) at the nearest data ancestor.
    pub fn register_schema_node(
        &mut self,
        holder: NodeId,
        name: &str,
        namespace: Option<&str>,
        node: NodeId,
    ) -> Result<()> {
        let identifier = SchemaNodeIdentifier::new(name, namespace.map(String::from));
        self.add_to_child_registry(holder, identifier, SchemaNodeContextInfo::new(node))
    }

    /// Inherit the parent's namespace and register with the parent.
    ///
    /// Leaves-holders additionally link their leaf and leaf-list children.
    /// Registration failures are returned to the caller.
    pub fn assign_namespace_and_register(&mut self, id: NodeId) -> Result<()> {
        self.link_node(id, RegistrationPolicy::Strict).map(|_| ())
    }

    /// Link one node under `policy`; returns the number of registrations skipped
    pub(crate) fn link_node(&mut self, id: NodeId, policy: RegistrationPolicy) -> Result<usize> {
        let node = self.node(id)?;
        let kind = node.kind().ok_or(StructuralError::UnsetKind)?;
        let parent = node.parent();
        let keeps_namespace = kind.defines_namespace() && node.namespace().is_some();

        let mut skipped = 0;
        if let Some(parent) = parent {
            if !keeps_namespace {
                let namespace = self.node(parent)?.namespace().map(String::from);
                self.node_mut(id)?.set_namespace(namespace);
            }
            skipped += self.register_with_parent(id, parent, policy)?;
        }

        if kind.is_leaves_holder() {
            let namespace = self.node(id)?.namespace().map(String::from);
            let leaves: Vec<NodeId> = self
                .children(id)
                .filter(|&child| self[child].kind().is_some_and(NodeKind::is_leaf_like))
                .collect();
            for leaf in leaves {
                self.node_mut(leaf)?.set_namespace(namespace.clone());
                skipped += self.register_with_parent(leaf, id, policy)?;
            }
        }
        Ok(skipped)
    }

    fn register_with_parent(
        &mut self,
        child: NodeId,
        parent: NodeId,
        policy: RegistrationPolicy,
    ) -> Result<usize> {
        let identifier = self.node(child)?.identifier().clone();
        let registered =
            self.add_to_child_registry(parent, identifier.clone(), SchemaNodeContextInfo::new(child));

        if let Err(err) = registered {
            return match policy {
                RegistrationPolicy::Strict => Err(err),
                RegistrationPolicy::BestEffort => {
                    tracing::warn!(
                        child = %identifier,
                        parent = %self[parent].name(),
                        error = %err,
                        "Skipping child registry registration"
                    );
                    Ok(1)
                }
            };
        }

        if self.node(child)?.is_linked() {
            return Ok(0);
        }
        self.node_mut(child)?.linked = true;

        let (mandatory, has_default) = self
            .node(child)?
            .data()
            .map(|data| (data.is_mandatory(), data.has_default()))
            .unwrap_or_default();
        if mandatory {
            self.increment_mandatory_child_count(parent)?;
        }
        if has_default {
            self.add_to_default_child_map(parent, identifier, child)?;
        }
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{ContainerData, LeafData, ModuleData, NodeData};
    use crate::node::SchemaNode;

    fn module_with_container(tree: &mut SchemaTree) -> (NodeId, NodeId) {
        let module = tree.alloc(
            SchemaNode::new("m", NodeData::Module(ModuleData::default()))
                .with_namespace("urn:test"),
        ).unwrap();
        let container = tree.alloc(SchemaNode::new(
            "c",
            NodeData::Container(ContainerData::default()),
        )).unwrap();
        tree.add_child(module, container).unwrap();
        (module, container)
    }

    #[test]
    fn test_container_inherits_module_namespace() {
        let mut tree = SchemaTree::new();
        let (module, container) = module_with_container(&mut tree);

        tree.assign_namespace_and_register(module).unwrap();
        tree.assign_namespace_and_register(container).unwrap();

        assert_eq!(tree[container].namespace(), Some("urn:test"));
        let info = tree
            .get_child_schema(module, &("c", "urn:test").into())
            .unwrap();
        assert_eq!(info.schema_node(), container);
    }

    #[test]
    fn test_get_child_schema_not_found() {
        let mut tree = SchemaTree::new();
        let (module, _) = module_with_container(&mut tree);

        let err = tree
            .get_child_schema(module, &("c", "urn:test").into())
            .unwrap_err();
        assert_eq!(
            err,
            Error::NotFound {
                name: "c".into(),
                parent: "m".into()
            }
        );
    }

    #[test]
    fn test_registration_is_idempotent() {
        let mut tree = SchemaTree::new();
        let (module, container) = module_with_container(&mut tree);
        let mandatory = tree.alloc(SchemaNode::new(
            "l",
            NodeData::Leaf(LeafData {
                mandatory: true,
                ..Default::default()
            }),
        )).unwrap();
        tree.add_child(container, mandatory).unwrap();

        tree.assign_namespace_and_register(container).unwrap();
        tree.assign_namespace_and_register(container).unwrap();
        tree.assign_namespace_and_register(mandatory).unwrap();

        assert_eq!(tree[module].child_registry().len(), 1);
        assert_eq!(tree[container].child_registry().len(), 1);
        assert_eq!(tree[container].mandatory_child_count(), 1);
    }

    #[test]
    fn test_duplicate_identifier_is_collision() {
        let mut tree = SchemaTree::new();
        let (module, container) = module_with_container(&mut tree);
        let twin = tree.alloc(SchemaNode::new(
            "c",
            NodeData::Leaf(LeafData::default()),
        )).unwrap();
        tree.add_child(module, twin).unwrap();

        tree.assign_namespace_and_register(container).unwrap();
        let err = tree.assign_namespace_and_register(twin).unwrap_err();
        assert!(err.is_collision());
        assert_eq!(
            tree.get_child_schema(module, &("c", "urn:test").into())
                .unwrap()
                .schema_node(),
            container
        );
    }

    #[test]
    fn test_leaf_rejects_registry_entries() {
        let mut tree = SchemaTree::new();
        let leaf = tree.alloc(SchemaNode::new("l", NodeData::Leaf(LeafData::default()))).unwrap();
        let other = tree.alloc(SchemaNode::new("x", NodeData::Leaf(LeafData::default()))).unwrap();

        let err = tree
            .register_schema_node(leaf, "x", None, other)
            .unwrap_err();
        assert_eq!(
            err,
            Error::Structural(StructuralError::LeafCannotHoldChildren)
        );
        tree.increment_mandatory_child_count(leaf).unwrap();
        assert_eq!(tree[leaf].mandatory_child_count(), 0);
    }

    #[test]
    fn test_defaults_recorded_on_parent() {
        let mut tree = SchemaTree::new();
        let (_, container) = module_with_container(&mut tree);
        let leaf = tree.alloc(SchemaNode::new(
            "speed",
            NodeData::Leaf(LeafData {
                default: Some("fast".into()),
                ..Default::default()
            }),
        )).unwrap();
        tree.add_child(container, leaf).unwrap();

        tree.assign_namespace_and_register(container).unwrap();

        let defaults = tree[container].default_child_map();
        assert_eq!(defaults.get(&("speed", "urn:test").into()), Some(&leaf));
    }
}

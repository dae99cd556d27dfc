//! Schema node
//!
//! A [`SchemaNode`] is one statement of the schema tree. Its structural links are
//! [`NodeId`] handles into the owning [`SchemaTree`](crate::SchemaTree); the node
//! itself never owns its relatives.

use crate::data::{LeafData, ListData, NodeData};
use crate::error::{Error, Result};
use crate::identifier::SchemaNodeIdentifier;
use crate::kind::NodeKind;
use crate::registry::SchemaNodeContextInfo;
use std::collections::HashMap;
use std::fmt;

/// Stable handle of a node inside a [`SchemaTree`](crate::SchemaTree)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    pub(crate) fn new(index: usize) -> Result<Self> {
        u32::try_from(index).map(Self).map_err(|_| {
            Error::InternalInvariant(format!("node index {} exceeds the handle range", index))
        })
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Line and column of the statement that produced a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
pub struct SourcePosition {
    pub line: u32,
    pub column: u32,
}

impl SourcePosition {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[derive(Debug, Clone)]
pub struct SchemaNode {
    identifier: SchemaNodeIdentifier,
    data: Option<NodeData>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) first_child: Option<NodeId>,
    pub(crate) next_sibling: Option<NodeId>,
    pub(crate) prev_sibling: Option<NodeId>,
    priority: i32,
    translate: bool,
    position: Option<SourcePosition>,
    pub(crate) mandatory_child_count: usize,
    pub(crate) default_child_map: HashMap<SchemaNodeIdentifier, NodeId>,
    pub(crate) child_registry: HashMap<SchemaNodeIdentifier, SchemaNodeContextInfo>,
    pub(crate) linked: bool,
}

impl SchemaNode {
    /// Create a bare node of the kind given by `data`
    pub fn new(name: impl Into<String>, data: NodeData) -> Self {
        Self::with_data(name, Some(data))
    }

    /// Create a node without a kind; such a node can never be inserted into a tree
    pub fn abstract_node(name: impl Into<String>) -> Self {
        Self::with_data(name, None)
    }

    fn with_data(name: impl Into<String>, data: Option<NodeData>) -> Self {
        Self {
            identifier: SchemaNodeIdentifier::unqualified(name),
            data,
            parent: None,
            first_child: None,
            next_sibling: None,
            prev_sibling: None,
            priority: 0,
            translate: true,
            position: None,
            mandatory_child_count: 0,
            default_child_map: HashMap::new(),
            child_registry: HashMap::new(),
            linked: false,
        }
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.identifier.set_namespace(Some(namespace.into()));
        self
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_position(mut self, position: SourcePosition) -> Self {
        self.position = Some(position);
        self
    }

    pub fn identifier(&self) -> &SchemaNodeIdentifier {
        &self.identifier
    }

    pub fn name(&self) -> &str {
        self.identifier.name()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.identifier.set_name(name);
    }

    pub fn namespace(&self) -> Option<&str> {
        self.identifier.namespace()
    }

    pub fn set_namespace(&mut self, namespace: Option<String>) {
        self.identifier.set_namespace(namespace);
    }

    pub fn kind(&self) -> Option<NodeKind> {
        self.data.as_ref().map(NodeData::kind)
    }

    pub fn data(&self) -> Option<&NodeData> {
        self.data.as_ref()
    }

    pub(crate) fn data_mut(&mut self) -> Option<&mut NodeData> {
        self.data.as_mut()
    }

    pub fn leaf(&self) -> Option<&LeafData> {
        match &self.data {
            Some(NodeData::Leaf(leaf)) => Some(leaf),
            _ => None,
        }
    }

    pub fn leaf_mut(&mut self) -> Option<&mut LeafData> {
        match &mut self.data {
            Some(NodeData::Leaf(leaf)) => Some(leaf),
            _ => None,
        }
    }

    pub fn list_mut(&mut self) -> Option<&mut ListData> {
        match &mut self.data {
            Some(NodeData::List(list)) => Some(list),
            _ => None,
        }
    }

    pub fn is_leaves_holder(&self) -> bool {
        self.kind().is_some_and(NodeKind::is_leaves_holder)
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn first_child(&self) -> Option<NodeId> {
        self.first_child
    }

    pub fn next_sibling(&self) -> Option<NodeId> {
        self.next_sibling
    }

    pub fn prev_sibling(&self) -> Option<NodeId> {
        self.prev_sibling
    }

    /// True when no structural link is set
    pub fn is_atomic(&self) -> bool {
        self.parent.is_none()
            && self.first_child.is_none()
            && self.next_sibling.is_none()
            && self.prev_sibling.is_none()
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }

    pub fn set_priority(&mut self, priority: i32) {
        self.priority = priority;
    }

    /// Whether the code generator should emit this node
    pub fn is_translated(&self) -> bool {
        self.translate
    }

    pub fn set_translate(&mut self, translate: bool) {
        self.translate = translate;
    }

    pub fn position(&self) -> Option<SourcePosition> {
        self.position
    }

    pub fn mandatory_child_count(&self) -> usize {
        self.mandatory_child_count
    }

    pub fn set_mandatory_child_count(&mut self, count: usize) {
        self.mandatory_child_count = count;
    }

    pub fn default_child_map(&self) -> &HashMap<SchemaNodeIdentifier, NodeId> {
        &self.default_child_map
    }

    pub fn child_registry(&self) -> &HashMap<SchemaNodeIdentifier, SchemaNodeContextInfo> {
        &self.child_registry
    }

    /// Whether the linking pass has registered this node with its parent
    pub fn is_linked(&self) -> bool {
        self.linked
    }

    /// Copy of this node with every link and linking result cleared
    pub(crate) fn detached_copy(&self) -> Self {
        Self {
            identifier: self.identifier.clone(),
            data: self.data.clone(),
            parent: None,
            first_child: None,
            next_sibling: None,
            prev_sibling: None,
            priority: self.priority,
            translate: self.translate,
            position: self.position,
            mandatory_child_count: 0,
            default_child_map: HashMap::new(),
            child_registry: HashMap::new(),
            linked: false,
        }
    }
}

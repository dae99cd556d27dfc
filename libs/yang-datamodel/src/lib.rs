//! YANG Schema Tree
//!
//! This crate holds the in-memory schema tree of a YANG compiler: the node
//! arena, namespace linking with per-node child registries, and grouping
//! expansion for `uses` statements.
//!
//! ## Pipeline
//!
//! 1. A front end allocates bare nodes and links them with
//!    [`SchemaTree::add_child`] (or builds them from a [`NodeOutline`]).
//! 2. Once root namespaces are known, the [`Linker`] assigns namespaces top-down
//!    and fills every holder's child registry.
//! 3. A uses resolver clones the grouping and uses roots with
//!    [`SchemaTree::clone_node`] and calls [`GroupingExpander::clone_subtree`]
//!    once per uses statement.
//! 4. The code generator reads the linked tree through
//!    [`SchemaTree::get_child_schema`], mandatory counts, default maps and the
//!    translate flag.
//!
//! # Example
//!
//! ```rust
//! use arbor_datamodel::{
//!     ContainerData, LeafData, Linker, ModuleData, NodeData, SchemaNode, SchemaTree,
//! };
//!
//! let mut tree = SchemaTree::new();
//! let module = tree
//!     .alloc(SchemaNode::new("m", NodeData::Module(ModuleData::default())).with_namespace("ns1"))
//!     .unwrap();
//! let container = tree
//!     .alloc(SchemaNode::new("c", NodeData::Container(ContainerData::default())))
//!     .unwrap();
//! let leaf = tree
//!     .alloc(SchemaNode::new("l", NodeData::Leaf(LeafData::default())))
//!     .unwrap();
//! tree.add_child(module, container).unwrap();
//! tree.add_child(container, leaf).unwrap();
//!
//! Linker::default().link(&mut tree, module).unwrap();
//!
//! let c = tree.get_child_schema(module, &("c", "ns1").into()).unwrap();
//! assert_eq!(c.schema_node(), container);
//! assert!(tree.get_child_schema(container, &("l", "ns1").into()).is_ok());
//! ```

pub mod clone;
pub mod data;
pub mod error;
pub mod expander;
pub mod identifier;
pub mod kind;
pub mod linker;
pub mod node;
pub mod ordering;
pub mod outline;
pub mod registry;
pub mod tree;

pub use clone::UsesContext;
pub use data::{
    AugmentData, CaseData, ChoiceData, ContainerData, EnumValue, EnumerationData, GroupingData,
    IdentityData, InputData, LeafData, LeafListData, LeafOrigin, LeafType, ListData, ModuleData,
    NodeData, NotificationData, OutputData, RpcData, SubModuleData, TypedefData, UnionData,
    UsesData,
};
pub use error::{Error, Link, Result, StructuralError};
pub use expander::{ExpansionReport, GroupingExpander};
pub use identifier::SchemaNodeIdentifier;
pub use kind::{NodeKind, RegistryBehavior};
pub use linker::{LinkReport, Linker, LinkerConfig, RegistrationPolicy};
pub use node::{NodeId, SchemaNode, SourcePosition};
pub use ordering::compare_priority;
pub use outline::NodeOutline;
pub use registry::SchemaNodeContextInfo;
pub use tree::SchemaTree;

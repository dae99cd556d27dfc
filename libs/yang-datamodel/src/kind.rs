//! Node kinds and the capabilities attached to each kind
//!
//! Capabilities replace runtime type checks: every behavior that only some
//! kinds support is answered by a `match` on [`NodeKind`].

use std::fmt;

/// Kind of YANG schema node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Module,
    SubModule,
    Container,
    List,
    Leaf,
    LeafList,
    Grouping,
    Uses,
    Augment,
    Choice,
    Case,
    Typedef,
    Union,
    Enumeration,
    Identity,
    Rpc,
    Input,
    Output,
    Notification,
}

/// How a kind treats entries added to its child registry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryBehavior {
    /// Named children are recorded
    Accumulate,
    /// Adding a child is a structural error
    Reject,
    /// Adding a child is silently ignored
    Ignore,
}

impl NodeKind {
    /// YANG keyword for this kind
    pub fn keyword(self) -> &'static str {
        match self {
            NodeKind::Module => "module",
            NodeKind::SubModule => "submodule",
            NodeKind::Container => "container",
            NodeKind::List => "list",
            NodeKind::Leaf => "leaf",
            NodeKind::LeafList => "leaf-list",
            NodeKind::Grouping => "grouping",
            NodeKind::Uses => "uses",
            NodeKind::Augment => "augment",
            NodeKind::Choice => "choice",
            NodeKind::Case => "case",
            NodeKind::Typedef => "typedef",
            NodeKind::Union => "union",
            NodeKind::Enumeration => "enumeration",
            NodeKind::Identity => "identity",
            NodeKind::Rpc => "rpc",
            NodeKind::Input => "input",
            NodeKind::Output => "output",
            NodeKind::Notification => "notification",
        }
    }

    /// Kinds whose leaf and leaf-list children are linked together with the holder
    pub fn is_leaves_holder(self) -> bool {
        matches!(
            self,
            NodeKind::Module
                | NodeKind::SubModule
                | NodeKind::Container
                | NodeKind::List
                | NodeKind::Grouping
                | NodeKind::Uses
                | NodeKind::Augment
                | NodeKind::Case
                | NodeKind::Input
                | NodeKind::Output
                | NodeKind::Notification
        )
    }

    pub fn is_leaf_like(self) -> bool {
        matches!(self, NodeKind::Leaf | NodeKind::LeafList)
    }

    /// Kinds that can check a new child's name against their existing children.
    ///
    /// Type definitions qualify too: a typedef holds its inline union or
    /// enumeration, and a union holds nested member definitions.
    pub fn is_collision_detector(self) -> bool {
        self.is_leaves_holder()
            || matches!(
                self,
                NodeKind::Choice
                    | NodeKind::Rpc
                    | NodeKind::Typedef
                    | NodeKind::Union
                    | NodeKind::Enumeration
            )
    }

    pub fn registry_behavior(self) -> RegistryBehavior {
        match self {
            NodeKind::Leaf | NodeKind::LeafList => RegistryBehavior::Reject,
            NodeKind::Typedef | NodeKind::Union | NodeKind::Enumeration | NodeKind::Identity => {
                RegistryBehavior::Ignore
            }
            _ => RegistryBehavior::Accumulate,
        }
    }

    /// Kinds whose namespace is assigned out-of-band rather than inherited
    pub fn defines_namespace(self) -> bool {
        matches!(
            self,
            NodeKind::Module | NodeKind::SubModule | NodeKind::Augment
        )
    }

    /// Module roots can never appear inside a grouping
    pub fn is_clonable(self) -> bool {
        !matches!(self, NodeKind::Module | NodeKind::SubModule)
    }

    /// Union and enumeration nodes hold the inline type definitions leaves bind to
    pub fn is_type_definition(self) -> bool {
        matches!(self, NodeKind::Union | NodeKind::Enumeration)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leaves_reject_registry_entries() {
        assert_eq!(NodeKind::Leaf.registry_behavior(), RegistryBehavior::Reject);
        assert_eq!(
            NodeKind::LeafList.registry_behavior(),
            RegistryBehavior::Reject
        );
        assert_eq!(
            NodeKind::Enumeration.registry_behavior(),
            RegistryBehavior::Ignore
        );
        assert_eq!(
            NodeKind::Container.registry_behavior(),
            RegistryBehavior::Accumulate
        );
    }

    #[test]
    fn test_choice_detects_collisions_but_holds_no_leaves() {
        assert!(NodeKind::Choice.is_collision_detector());
        assert!(!NodeKind::Choice.is_leaves_holder());
        assert!(!NodeKind::Leaf.is_collision_detector());
    }

    #[test]
    fn test_type_definitions_detect_collisions_without_registry() {
        for kind in [NodeKind::Typedef, NodeKind::Union, NodeKind::Enumeration] {
            assert!(kind.is_collision_detector(), "{kind}");
            assert_eq!(kind.registry_behavior(), RegistryBehavior::Ignore);
        }
        assert!(!NodeKind::Identity.is_collision_detector());
    }

    #[test]
    fn test_keyword_display() {
        assert_eq!(NodeKind::LeafList.to_string(), "leaf-list");
        assert_eq!(NodeKind::SubModule.to_string(), "submodule");
    }
}

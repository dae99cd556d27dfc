//! Kind-specific node payloads
//!
//! Each [`NodeData`] variant carries only scalar statement data. Structure
//! (parent, children, siblings) lives on [`SchemaNode`](crate::SchemaNode) and is
//! never part of the payload, so cloning a payload is always a value copy.

use crate::kind::NodeKind;
use crate::node::NodeId;
use serde::Deserialize;

/// Payload of a schema node; the variant determines the node's kind
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum NodeData {
    Module(ModuleData),
    #[serde(rename = "submodule")]
    SubModule(SubModuleData),
    Container(ContainerData),
    List(ListData),
    Leaf(LeafData),
    LeafList(LeafListData),
    Grouping(GroupingData),
    Uses(UsesData),
    Augment(AugmentData),
    Choice(ChoiceData),
    Case(CaseData),
    Typedef(TypedefData),
    Union(UnionData),
    Enumeration(EnumerationData),
    Identity(IdentityData),
    Rpc(RpcData),
    Input(InputData),
    Output(OutputData),
    Notification(NotificationData),
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ModuleData {
    pub prefix: Option<String>,
    pub revision: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SubModuleData {
    /// Name of the module this submodule belongs to
    pub belongs_to: Option<String>,
    pub revision: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContainerData {
    /// Presence statement; `None` for non-presence containers
    pub presence: Option<String>,
    pub config: Option<bool>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ListData {
    pub keys: Vec<String>,
    pub min_elements: u32,
    pub max_elements: Option<u32>,
    pub config: Option<bool>,
    pub description: Option<String>,
}

/// Type of a leaf or leaf-list
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LeafType {
    /// Type name as written (`string`, `union`, `enumeration`, a typedef name, ...)
    pub name: String,
    /// Name of the sibling union/enumeration node holding an inline definition
    pub definition: Option<String>,
    /// Bound definition node, set when the inline definition is resolved
    #[serde(skip)]
    pub resolved: Option<NodeId>,
}

impl LeafType {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            definition: None,
            resolved: None,
        }
    }

    /// Type whose definition lives in the named union/enumeration node
    pub fn inline(name: impl Into<String>, definition: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            definition: Some(definition.into()),
            resolved: None,
        }
    }
}

impl Default for LeafType {
    fn default() -> Self {
        Self::named("string")
    }
}

/// Where a leaf copy came from; set only on leaves created by grouping expansion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeafOrigin {
    /// Leaf in the grouping this leaf was copied from
    pub referred_leaf: NodeId,
    /// Uses site whose expansion created this leaf
    pub added_by_uses: NodeId,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LeafData {
    #[serde(rename = "type")]
    pub leaf_type: LeafType,
    pub default: Option<String>,
    pub mandatory: bool,
    pub config: Option<bool>,
    pub units: Option<String>,
    pub description: Option<String>,
    #[serde(skip)]
    pub origin: Option<LeafOrigin>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LeafListData {
    #[serde(rename = "type")]
    pub leaf_type: LeafType,
    pub min_elements: u32,
    pub max_elements: Option<u32>,
    pub config: Option<bool>,
    pub units: Option<String>,
    pub description: Option<String>,
    #[serde(skip)]
    pub origin: Option<LeafOrigin>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GroupingData {
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UsesData {
    /// Name of the grouping, possibly prefixed
    pub grouping: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AugmentData {
    /// Schema node identifier path of the augmented target
    pub target: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChoiceData {
    pub default_case: Option<String>,
    pub mandatory: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CaseData {
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TypedefData {
    pub base_type: String,
    pub default: Option<String>,
    pub units: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UnionData {
    pub member_types: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EnumValue {
    pub name: String,
    pub value: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EnumerationData {
    pub values: Vec<EnumValue>,
}

impl EnumerationData {
    pub fn value_of(&self, name: &str) -> Option<i32> {
        self.values.iter().find(|v| v.name == name).map(|v| v.value)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IdentityData {
    pub base: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RpcData {
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct InputData {}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct OutputData {}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NotificationData {
    pub description: Option<String>,
}

impl NodeData {
    pub fn kind(&self) -> NodeKind {
        match self {
            NodeData::Module(_) => NodeKind::Module,
            NodeData::SubModule(_) => NodeKind::SubModule,
            NodeData::Container(_) => NodeKind::Container,
            NodeData::List(_) => NodeKind::List,
            NodeData::Leaf(_) => NodeKind::Leaf,
            NodeData::LeafList(_) => NodeKind::LeafList,
            NodeData::Grouping(_) => NodeKind::Grouping,
            NodeData::Uses(_) => NodeKind::Uses,
            NodeData::Augment(_) => NodeKind::Augment,
            NodeData::Choice(_) => NodeKind::Choice,
            NodeData::Case(_) => NodeKind::Case,
            NodeData::Typedef(_) => NodeKind::Typedef,
            NodeData::Union(_) => NodeKind::Union,
            NodeData::Enumeration(_) => NodeKind::Enumeration,
            NodeData::Identity(_) => NodeKind::Identity,
            NodeData::Rpc(_) => NodeKind::Rpc,
            NodeData::Input(_) => NodeKind::Input,
            NodeData::Output(_) => NodeKind::Output,
            NodeData::Notification(_) => NodeKind::Notification,
        }
    }

    /// Type of a leaf or leaf-list payload
    pub fn leaf_type(&self) -> Option<&LeafType> {
        match self {
            NodeData::Leaf(leaf) => Some(&leaf.leaf_type),
            NodeData::LeafList(leaf_list) => Some(&leaf_list.leaf_type),
            _ => None,
        }
    }

    pub fn leaf_type_mut(&mut self) -> Option<&mut LeafType> {
        match self {
            NodeData::Leaf(leaf) => Some(&mut leaf.leaf_type),
            NodeData::LeafList(leaf_list) => Some(&mut leaf_list.leaf_type),
            _ => None,
        }
    }

    pub fn leaf_origin(&self) -> Option<LeafOrigin> {
        match self {
            NodeData::Leaf(leaf) => leaf.origin,
            NodeData::LeafList(leaf_list) => leaf_list.origin,
            _ => None,
        }
    }

    pub(crate) fn set_leaf_origin(&mut self, origin: LeafOrigin) {
        match self {
            NodeData::Leaf(leaf) => leaf.origin = Some(origin),
            NodeData::LeafList(leaf_list) => leaf_list.origin = Some(origin),
            _ => {}
        }
    }

    /// Whether an instance of this node must be present in its parent
    pub fn is_mandatory(&self) -> bool {
        match self {
            NodeData::Leaf(leaf) => leaf.mandatory,
            NodeData::Choice(choice) => choice.mandatory,
            NodeData::List(list) => list.min_elements > 0,
            NodeData::LeafList(leaf_list) => leaf_list.min_elements > 0,
            _ => false,
        }
    }

    /// Whether this node supplies a default to its parent
    pub fn has_default(&self) -> bool {
        match self {
            NodeData::Leaf(leaf) => leaf.default.is_some(),
            NodeData::Choice(choice) => choice.default_case.is_some(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_tagged_leaf() {
        let data: NodeData = serde_json::from_value(json!({
            "kind": "leaf",
            "type": { "name": "enumeration", "definition": "speed" },
            "default": "fast",
            "mandatory": false
        }))
        .unwrap();

        assert_eq!(data.kind(), NodeKind::Leaf);
        assert!(data.has_default());
        let leaf_type = data.leaf_type().unwrap();
        assert_eq!(leaf_type.name, "enumeration");
        assert_eq!(leaf_type.definition.as_deref(), Some("speed"));
        assert!(leaf_type.resolved.is_none());
    }

    #[test]
    fn test_mandatory_rules() {
        let list = NodeData::List(ListData {
            min_elements: 1,
            ..Default::default()
        });
        assert!(list.is_mandatory());
        assert!(!NodeData::Container(ContainerData::default()).is_mandatory());
        assert!(NodeData::Choice(ChoiceData {
            mandatory: true,
            ..Default::default()
        })
        .is_mandatory());
    }

    #[test]
    fn test_enumeration_lookup() {
        let data: EnumerationData = serde_json::from_value(json!({
            "values": [{ "name": "slow", "value": 0 }, { "name": "fast", "value": 1 }]
        }))
        .unwrap();
        assert_eq!(data.value_of("fast"), Some(1));
        assert_eq!(data.value_of("medium"), None);
    }

    #[test]
    fn test_default_leaf_type_is_string() {
        let data: NodeData = serde_json::from_value(json!({ "kind": "leaf-list" })).unwrap();
        assert_eq!(data.leaf_type().unwrap().name, "string");
    }
}

#![allow(dead_code)]

use arbor_datamodel::{
    ExpansionReport, GroupingExpander, NodeId, NodeOutline, Result, SchemaTree, UsesContext,
};
use serde_json::Value;

/// Build an outlined subtree into `tree`
pub fn build(tree: &mut SchemaTree, outline: Value) -> NodeId {
    NodeOutline::from_value(&outline)
        .expect("invalid outline fixture")
        .build_into(tree)
        .expect("failed to build outline fixture")
}

/// Resolve a slash-separated child path below `root`
pub fn node_at(tree: &SchemaTree, root: NodeId, path: &str) -> NodeId {
    path.split('/').fold(root, |current, name| {
        tree.find_child(current, name)
            .unwrap_or_else(|| panic!("no child '{}' below '{}'", name, tree[current].name()))
    })
}

pub fn child_names(tree: &SchemaTree, parent: NodeId) -> Vec<String> {
    tree.children(parent)
        .map(|child| tree[child].name().to_string())
        .collect()
}

/// Expand `grouping` into `uses` the way a uses resolver would
pub fn expand(tree: &mut SchemaTree, grouping: NodeId, uses: NodeId) -> Result<ExpansionReport> {
    let ctx = UsesContext::new(uses, grouping);
    GroupingExpander::new(tree).clone_subtree(grouping, uses, &ctx)
}

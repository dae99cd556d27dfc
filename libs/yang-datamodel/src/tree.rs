//! Schema tree arena
//!
//! [`SchemaTree`] owns every node of one compilation unit. Nodes refer to each
//! other through [`NodeId`] handles, so parent back-references and sibling chains
//! need no shared ownership. Nodes are never removed; handles stay valid for the
//! lifetime of the tree.

use crate::error::{Error, Link, Result, StructuralError};
use crate::node::{NodeId, SchemaNode};
use std::ops::{Index, IndexMut};

#[derive(Debug, Clone, Default)]
pub struct SchemaTree {
    nodes: Vec<SchemaNode>,
}

impl SchemaTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of a bare node; it joins the tree structure only through
    /// [`add_child`](Self::add_child)
    ///
    /// Fails once the arena holds more nodes than a [`NodeId`] can address.
    pub fn alloc(&mut self, node: SchemaNode) -> Result<NodeId> {
        let id = NodeId::new(self.nodes.len())?;
        self.nodes.push(node);
        Ok(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: NodeId) -> Option<&SchemaNode> {
        self.nodes.get(id.index())
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut SchemaNode> {
        self.nodes.get_mut(id.index())
    }

    pub(crate) fn node(&self, id: NodeId) -> Result<&SchemaNode> {
        self.get(id)
            .ok_or_else(|| Error::InternalInvariant(format!("node {} is not in this tree", id)))
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Result<&mut SchemaNode> {
        self.get_mut(id)
            .ok_or_else(|| Error::InternalInvariant(format!("node {} is not in this tree", id)))
    }

    /// All allocated nodes that have no parent
    pub fn roots(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| node.parent().is_none())
            .filter_map(|(index, _)| NodeId::new(index).ok())
    }

    /// Append `new_child` as the last child of `parent`.
    ///
    /// Insertion order is preserved. The new node must have a kind and must be
    /// atomic: no child, no siblings, and no parent other than `parent`.
    pub fn add_child(&mut self, parent: NodeId, new_child: NodeId) -> Result<()> {
        if parent == new_child {
            return Err(Error::InternalInvariant(format!(
                "node {} cannot be added as its own child",
                parent
            )));
        }
        let parent_first_child = self.node(parent)?.first_child;
        let new = self.node(new_child)?;

        if new.kind().is_none() {
            return Err(StructuralError::UnsetKind.into());
        }
        match new.parent {
            None => {}
            Some(existing) if existing == parent && parent_first_child != Some(new_child) => {}
            Some(_) => return Err(StructuralError::AlreadyParented.into()),
        }
        check_atomic_links(new)?;

        self.nodes[new_child.index()].parent = Some(parent);
        match parent_first_child {
            None => self.nodes[parent.index()].first_child = Some(new_child),
            Some(first) => {
                let tail = self.last_sibling(first)?;
                self.nodes[tail.index()].next_sibling = Some(new_child);
                self.nodes[new_child.index()].prev_sibling = Some(tail);
            }
        }
        Ok(())
    }

    /// Link `new_sibling` directly after `current`, sharing its parent.
    ///
    /// Used while cloning, where `current` is always the tail of its chain.
    pub(crate) fn add_next_sibling(&mut self, current: NodeId, new_sibling: NodeId) -> Result<()> {
        if current == new_sibling {
            return Err(Error::InternalInvariant(format!(
                "node {} cannot be its own sibling",
                current
            )));
        }
        let cur = self.node(current)?;
        let parent = cur.parent;
        if cur.next_sibling.is_some() {
            return Err(Error::InternalInvariant(format!(
                "sibling insertion after '{}' would detach its next sibling",
                cur.name()
            )));
        }

        let new = self.node(new_sibling)?;
        if new.kind().is_none() {
            return Err(StructuralError::UnsetKind.into());
        }
        if new.parent.is_some() {
            return Err(StructuralError::AlreadyParented.into());
        }
        check_atomic_links(new)?;

        let new = &mut self.nodes[new_sibling.index()];
        new.parent = parent;
        new.prev_sibling = Some(current);
        self.nodes[current.index()].next_sibling = Some(new_sibling);
        Ok(())
    }

    fn last_sibling(&self, start: NodeId) -> Result<NodeId> {
        let mut current = start;
        while let Some(next) = self.node(current)?.next_sibling {
            current = next;
        }
        Ok(current)
    }

    /// Children of `id` in sibling-chain order
    pub fn children(&self, id: NodeId) -> Children<'_> {
        Children {
            tree: self,
            next: self.get(id).and_then(SchemaNode::first_child),
        }
    }

    /// Parent chain of `id`, nearest first
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: self.get(id).and_then(SchemaNode::parent),
        }
    }

    /// Pre-order walk of the subtree below `root`, excluding `root` itself
    pub fn descendants(&self, root: NodeId) -> Descendants<'_> {
        Descendants {
            tree: self,
            root,
            next: self.get(root).and_then(SchemaNode::first_child),
        }
    }

    /// First child of `parent` with the given name, regardless of namespace or kind
    pub fn find_child(&self, parent: NodeId, name: &str) -> Option<NodeId> {
        self.children(parent).find(|&child| self[child].name() == name)
    }

    /// Slash-separated names from the outermost ancestor down to `id`
    pub fn path(&self, id: NodeId) -> String {
        let mut names: Vec<&str> = self.ancestors(id).map(|a| self[a].name()).collect();
        names.reverse();
        if let Some(node) = self.get(id) {
            names.push(node.name());
        }
        format!("/{}", names.join("/"))
    }
}

fn check_atomic_links(node: &SchemaNode) -> Result<()> {
    if node.first_child.is_some() {
        return Err(StructuralError::NotAtomic(Link::Child).into());
    }
    if node.next_sibling.is_some() {
        return Err(StructuralError::NotAtomic(Link::NextSibling).into());
    }
    if node.prev_sibling.is_some() {
        return Err(StructuralError::NotAtomic(Link::PreviousSibling).into());
    }
    Ok(())
}

impl Index<NodeId> for SchemaTree {
    type Output = SchemaNode;

    fn index(&self, id: NodeId) -> &SchemaNode {
        &self.nodes[id.index()]
    }
}

impl IndexMut<NodeId> for SchemaTree {
    fn index_mut(&mut self, id: NodeId) -> &mut SchemaNode {
        &mut self.nodes[id.index()]
    }
}

pub struct Children<'a> {
    tree: &'a SchemaTree,
    next: Option<NodeId>,
}

impl Iterator for Children<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.tree.get(current).and_then(SchemaNode::next_sibling);
        Some(current)
    }
}

pub struct Ancestors<'a> {
    tree: &'a SchemaTree,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.tree.get(current).and_then(SchemaNode::parent);
        Some(current)
    }
}

pub struct Descendants<'a> {
    tree: &'a SchemaTree,
    root: NodeId,
    next: Option<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        let node = self.tree.get(current)?;

        self.next = if let Some(child) = node.first_child() {
            Some(child)
        } else {
            let mut cursor = current;
            loop {
                if cursor == self.root {
                    break None;
                }
                let cursor_node = self.tree.get(cursor)?;
                if let Some(sibling) = cursor_node.next_sibling() {
                    break Some(sibling);
                }
                match cursor_node.parent() {
                    Some(parent) if parent != self.root => cursor = parent,
                    _ => break None,
                }
            }
        };
        Some(current)
    }
}

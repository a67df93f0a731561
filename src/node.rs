use std::fmt;

use itertools::Itertools;

use crate::arena::{NodeId, TreeArena};
use crate::expandable::Expansion;

/// Tree node in the arena-based hierarchy structure.
#[derive(Debug, Clone)]
pub struct TreeNode<T> {
    pub(crate) value: T,
    /// Index of parent node in the arena, None for root nodes
    pub(crate) parent: Option<NodeId>,
    /// Indices of child nodes in the arena, in traversal order
    pub(crate) children: Vec<NodeId>,
    /// Distance from the root, assigned at attach time
    pub(crate) depth: usize,
    /// Open/closed state, present only on expandable nodes
    pub(crate) expansion: Option<Expansion>,
}

impl<T> TreeNode<T> {
    pub(crate) fn new(value: T, expansion: Option<Expansion>) -> Self {
        Self {
            value,
            parent: None,
            children: Vec::new(),
            depth: 0,
            expansion,
        }
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Cached depth. May be stale if an ancestor was re-parented after this
    /// node was attached; see [`TreeArena::resolved_depth`].
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn expansion(&self) -> Option<Expansion> {
        self.expansion
    }

    pub fn is_expandable(&self) -> bool {
        self.expansion.is_some()
    }

    pub fn is_open(&self) -> bool {
        self.expansion.is_some_and(|e| e.is_open)
    }

    pub fn can_expand(&self) -> bool {
        self.is_expandable() && !self.is_leaf()
    }
}

/// Borrowed view of a live node together with the arena it belongs to.
///
/// Used for navigation (`parent`, `children`) and for the textual
/// description of a subtree via [`fmt::Display`].
pub struct NodeRef<'a, T> {
    arena: &'a TreeArena<T>,
    id: NodeId,
    node: &'a TreeNode<T>,
}

impl<T> Clone for NodeRef<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for NodeRef<'_, T> {}

impl<T: fmt::Debug> fmt::Debug for NodeRef<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("node", self.node)
            .finish()
    }
}

impl<'a, T> NodeRef<'a, T> {
    pub(crate) fn new(arena: &'a TreeArena<T>, id: NodeId, node: &'a TreeNode<T>) -> Self {
        Self { arena, id, node }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn node(&self) -> &'a TreeNode<T> {
        self.node
    }

    pub fn value(&self) -> &'a T {
        &self.node.value
    }

    pub fn depth(&self) -> usize {
        self.node.depth
    }

    pub fn is_leaf(&self) -> bool {
        self.node.is_leaf()
    }

    pub fn is_open(&self) -> bool {
        self.node.is_open()
    }

    pub fn can_expand(&self) -> bool {
        self.node.can_expand()
    }

    pub fn height(&self) -> usize {
        self.arena.height(self.id).unwrap_or(0)
    }

    pub fn parent(&self) -> Option<NodeRef<'a, T>> {
        self.node.parent.and_then(|p| self.arena.node(p))
    }

    pub fn children(&self) -> impl Iterator<Item = NodeRef<'a, T>> + 'a {
        let arena = self.arena;
        self.node.children.iter().filter_map(move |&c| arena.node(c))
    }
}

// "value {child, child} " for internal nodes, "value" for leaves
impl<T: fmt::Display> fmt::Display for NodeRef<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())?;
        if !self.is_leaf() {
            write!(f, " {{{}}} ", self.children().join(", "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_description_of_leaf_is_value_only() {
        let mut tree = TreeArena::new();
        let leaf = tree.insert("leaf");
        assert_eq!(tree.node(leaf).unwrap().to_string(), "leaf");
    }

    #[test]
    fn test_description_nests_children() {
        let mut tree = TreeArena::new();
        let root = tree.insert("root");
        let a = tree.insert("a");
        let b = tree.insert("b");
        let c = tree.insert("c");
        tree.attach_all(root, [a, b]).unwrap();
        tree.attach(b, c).unwrap();

        assert_eq!(tree.node(root).unwrap().to_string(), "root {a, b {c} } ");
    }

    #[test]
    fn test_node_ref_navigation() {
        let mut tree = TreeArena::new();
        let root = tree.insert(1);
        let child = tree.insert(2);
        tree.attach(root, child).unwrap();

        let child_ref = tree.node(child).unwrap();
        assert_eq!(*child_ref.value(), 2);
        assert_eq!(child_ref.parent().map(|p| p.id()), Some(root));
        let values: Vec<i32> = tree.node(root).unwrap().children().map(|c| *c.value()).collect();
        assert_eq!(values, vec![2]);
    }
}

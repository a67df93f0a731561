use std::collections::VecDeque;
use std::fmt;

use generational_arena::{Arena, Index};
use tracing::{debug, instrument};

use crate::errors::{TreeError, TreeResult};
use crate::expandable::Expansion;
use crate::node::{NodeRef, TreeNode};

/// Handle to a node stored in a [`TreeArena`].
///
/// Generational: once the node is removed the handle goes stale and every
/// lookup through it yields `None`, even if the slot is reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(Index);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (slot, generation) = self.0.into_raw_parts();
        write!(f, "#{}g{}", slot, generation)
    }
}

/// Arena-based storage for one or more trees.
///
/// Every node is owned by the arena. Parent/child links are [`NodeId`]s, so
/// the parent link never owns anything and no reference cycles can form.
/// A node without parent is a root; the arena may hold many roots.
#[derive(Debug)]
pub struct TreeArena<T> {
    arena: Arena<TreeNode<T>>,
}

impl<T> Default for TreeArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TreeArena<T> {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
        }
    }

    /// Inserts a standalone plain node with depth 0.
    #[instrument(level = "trace", skip(self, value))]
    pub fn insert(&mut self, value: T) -> NodeId {
        self.insert_node(value, None)
    }

    pub(crate) fn insert_node(&mut self, value: T, expansion: Option<Expansion>) -> NodeId {
        NodeId(self.arena.insert(TreeNode::new(value, expansion)))
    }

    pub fn get_node(&self, id: NodeId) -> Option<&TreeNode<T>> {
        self.arena.get(id.0)
    }

    pub(crate) fn get_node_mut(&mut self, id: NodeId) -> Option<&mut TreeNode<T>> {
        self.arena.get_mut(id.0)
    }

    pub fn node(&self, id: NodeId) -> Option<NodeRef<'_, T>> {
        self.get_node(id).map(|node| NodeRef::new(self, id, node))
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.arena.contains(id.0)
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    pub fn value(&self, id: NodeId) -> Option<&T> {
        self.get_node(id).map(TreeNode::value)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get_node(id).and_then(TreeNode::parent)
    }

    /// Children of `id` in traversal order; empty for unknown ids.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get_node(id).map(TreeNode::children).unwrap_or(&[])
    }

    pub fn is_leaf(&self, id: NodeId) -> bool {
        self.get_node(id).is_some_and(TreeNode::is_leaf)
    }

    /// Cached depth assigned when the node was last attached.
    pub fn depth(&self, id: NodeId) -> Option<usize> {
        self.get_node(id).map(TreeNode::depth)
    }

    /// Depth recomputed from the parent chain. Never stale.
    #[instrument(level = "trace", skip(self))]
    pub fn resolved_depth(&self, id: NodeId) -> Option<usize> {
        self.get_node(id)?;
        Some(self.ancestors(id).count())
    }

    /// All nodes without a parent, in arena slot order.
    pub fn roots(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.arena
            .iter()
            .filter(|(_, node)| node.is_root())
            .map(|(idx, _)| NodeId(idx))
    }

    /// Parent, grandparent, ... up to the root. Excludes `id` itself.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_, T> {
        Ancestors {
            arena: self,
            next: self.parent(id),
        }
    }

    /// Pre-order depth-first iteration over the subtree rooted at `id`.
    pub fn iter_from(&self, id: NodeId) -> TreeIterator<'_, T> {
        TreeIterator::new(self, id)
    }

    /// Post-order depth-first iteration over the subtree rooted at `id`.
    pub fn iter_postorder_from(&self, id: NodeId) -> PostOrderIterator<'_, T> {
        PostOrderIterator::new(self, id)
    }

    /// Breadth-first iteration over the subtree rooted at `id`, yielding
    /// each node with its distance from `id`.
    pub fn iter_level_order_from(&self, id: NodeId) -> LevelOrderIterator<'_, T> {
        LevelOrderIterator::new(self, id)
    }

    /// Appends `child` to `parent`'s children and assigns
    /// `child.depth = parent.depth + 1`.
    ///
    /// A child that already has a parent is moved: it is removed from the
    /// old parent's children first. Depths of `child`'s own descendants are
    /// left as they are (see [`TreeArena::refresh_depths`]).
    #[instrument(level = "debug", skip(self))]
    pub fn attach(&mut self, parent: NodeId, child: NodeId) -> TreeResult<()> {
        let parent_depth = self
            .get_node(parent)
            .ok_or(TreeError::NodeNotFound(parent))?
            .depth;
        if !self.contains(child) {
            return Err(TreeError::NodeNotFound(child));
        }
        if parent == child || self.ancestors(parent).any(|a| a == child) {
            return Err(TreeError::CycleDetected { parent, child });
        }

        self.unlink(child);
        if let Some(node) = self.get_node_mut(parent) {
            node.children.push(child);
        }
        if let Some(node) = self.get_node_mut(child) {
            node.parent = Some(parent);
            node.depth = parent_depth + 1;
        }
        debug!("attached {} under {} at depth {}", child, parent, parent_depth + 1);
        Ok(())
    }

    /// Attaches each child in order. Stops at the first failing attach.
    #[instrument(level = "debug", skip(self, children))]
    pub fn attach_all<I>(&mut self, parent: NodeId, children: I) -> TreeResult<()>
    where
        I: IntoIterator<Item = NodeId>,
    {
        for child in children {
            self.attach(parent, child)?;
        }
        Ok(())
    }

    /// Unlinks `id` from its parent; it becomes a root with depth 0.
    #[instrument(level = "debug", skip(self))]
    pub fn detach(&mut self, id: NodeId) -> TreeResult<()> {
        if !self.contains(id) {
            return Err(TreeError::NodeNotFound(id));
        }
        self.unlink(id);
        if let Some(node) = self.get_node_mut(id) {
            node.depth = 0;
        }
        Ok(())
    }

    /// Removes `id` and its whole subtree from the arena, returning the
    /// value of `id`. Handles to any removed node go stale.
    #[instrument(level = "debug", skip(self))]
    pub fn remove(&mut self, id: NodeId) -> Option<T> {
        if !self.contains(id) {
            return None;
        }
        self.unlink(id);

        let subtree: Vec<NodeId> = self.iter_postorder_from(id).map(|(i, _)| i).collect();
        debug!("removing {} nodes rooted at {}", subtree.len(), id);

        let mut root_value = None;
        for node_id in subtree {
            if let Some(node) = self.arena.remove(node_id.0) {
                if node_id == id {
                    root_value = Some(node.value);
                }
            }
        }
        root_value
    }

    /// Rewrites the cached depth of every node under `id` (inclusive) from
    /// the resolved depth of `id`.
    #[instrument(level = "debug", skip(self))]
    pub fn refresh_depths(&mut self, id: NodeId) -> TreeResult<()> {
        let base = self.resolved_depth(id).ok_or(TreeError::NodeNotFound(id))?;
        let mut stack = vec![(id, base)];

        while let Some((current, depth)) = stack.pop() {
            if let Some(node) = self.get_node_mut(current) {
                node.depth = depth;
                stack.extend(node.children.iter().map(|&child| (child, depth + 1)));
            }
        }
        Ok(())
    }

    /// Longest downward path to a leaf, in edges. Walks the full subtree.
    #[instrument(level = "trace", skip(self))]
    pub fn height(&self, id: NodeId) -> Option<usize> {
        let node = self.get_node(id)?;
        Some(
            node.children
                .iter()
                .filter_map(|&child| self.height(child))
                .map(|h| h + 1)
                .max()
                .unwrap_or(0),
        )
    }

    /// Pre-order nodes of the subtree. Internal nodes always, leaves only
    /// with `include_leaves`. `None` when nothing qualifies.
    #[instrument(level = "debug", skip(self))]
    pub fn flatten(&self, id: NodeId, include_leaves: bool) -> Option<Vec<NodeId>> {
        let nodes: Vec<NodeId> = self
            .iter_from(id)
            .filter(|(_, node)| include_leaves || !node.is_leaf())
            .map(|(i, _)| i)
            .collect();

        if nodes.is_empty() {
            None
        } else {
            Some(nodes)
        }
    }

    fn unlink(&mut self, id: NodeId) {
        let Some(old_parent) = self.get_node_mut(id).and_then(|node| node.parent.take()) else {
            return;
        };
        if let Some(parent) = self.get_node_mut(old_parent) {
            parent.children.retain(|&c| c != id);
        }
    }
}

impl<T> TreeArena<T> {
    /// First pre-order match for `target` in the subtree rooted at `id`.
    #[instrument(level = "debug", skip(self, target))]
    pub fn find<Q>(&self, id: NodeId, target: &Q) -> Option<NodeId>
    where
        T: PartialEq<Q>,
        Q: ?Sized,
    {
        self.iter_from(id)
            .find(|(_, node)| node.value == *target)
            .map(|(i, _)| i)
    }
}

pub struct Ancestors<'a, T> {
    arena: &'a TreeArena<T>,
    next: Option<NodeId>,
}

impl<T> Iterator for Ancestors<'_, T> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.arena.parent(current);
        Some(current)
    }
}

pub struct TreeIterator<'a, T> {
    arena: &'a TreeArena<T>,
    stack: Vec<NodeId>,
}

impl<'a, T> TreeIterator<'a, T> {
    fn new(arena: &'a TreeArena<T>, start: NodeId) -> Self {
        let mut stack = Vec::new();
        if arena.contains(start) {
            stack.push(start);
        }
        Self { arena, stack }
    }
}

impl<'a, T> Iterator for TreeIterator<'a, T> {
    type Item = (NodeId, &'a TreeNode<T>);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current) = self.stack.pop() {
            if let Some(node) = self.arena.get_node(current) {
                // Push children in reverse order for left-to-right traversal
                self.stack.extend(node.children.iter().rev());
                return Some((current, node));
            }
        }
        None
    }
}

pub struct PostOrderIterator<'a, T> {
    arena: &'a TreeArena<T>,
    stack: Vec<(NodeId, bool)>,
}

impl<'a, T> PostOrderIterator<'a, T> {
    fn new(arena: &'a TreeArena<T>, start: NodeId) -> Self {
        let mut stack = Vec::new();
        if arena.contains(start) {
            stack.push((start, false));
        }
        Self { arena, stack }
    }
}

impl<'a, T> Iterator for PostOrderIterator<'a, T> {
    type Item = (NodeId, &'a TreeNode<T>);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current, visited)) = self.stack.pop() {
            if let Some(node) = self.arena.get_node(current) {
                if visited {
                    return Some((current, node));
                }
                self.stack.push((current, true));
                self.stack
                    .extend(node.children.iter().rev().map(|&child| (child, false)));
            }
        }
        None
    }
}

pub struct LevelOrderIterator<'a, T> {
    arena: &'a TreeArena<T>,
    queue: VecDeque<(NodeId, usize)>,
}

impl<'a, T> LevelOrderIterator<'a, T> {
    fn new(arena: &'a TreeArena<T>, start: NodeId) -> Self {
        let mut queue = VecDeque::new();
        if arena.contains(start) {
            queue.push_back((start, 0));
        }
        Self { arena, queue }
    }
}

impl<'a, T> Iterator for LevelOrderIterator<'a, T> {
    type Item = (NodeId, usize, &'a TreeNode<T>);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current, distance)) = self.queue.pop_front() {
            if let Some(node) = self.arena.get_node(current) {
                self.queue
                    .extend(node.children.iter().map(|&child| (child, distance + 1)));
                return Some((current, distance, node));
            }
        }
        None
    }
}

//! Expand/collapse capability layered on top of plain tree nodes.
//!
//! A node becomes expandable by carrying an [`Expansion`]. Plain and
//! expandable nodes mix freely in one tree; the visibility walk only
//! recurses through expandable nodes.

use tracing::{debug, instrument};

use crate::arena::{NodeId, TreeArena};
use crate::errors::{TreeError, TreeResult};

/// Open/closed state of an expandable node. Closed by default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Expansion {
    pub is_open: bool,
}

impl<T> TreeArena<T> {
    /// Inserts a standalone expandable node, initially closed.
    #[instrument(level = "trace", skip(self, value))]
    pub fn insert_expandable(&mut self, value: T) -> NodeId {
        self.insert_node(value, Some(Expansion::default()))
    }

    /// Adds the expandable capability to an existing node. Keeps the current
    /// state if the node already has it.
    #[instrument(level = "debug", skip(self))]
    pub fn make_expandable(&mut self, id: NodeId) -> TreeResult<()> {
        let node = self.get_node_mut(id).ok_or(TreeError::NodeNotFound(id))?;
        node.expansion.get_or_insert_with(Expansion::default);
        Ok(())
    }

    pub fn is_expandable(&self, id: NodeId) -> bool {
        self.get_node(id).is_some_and(|n| n.is_expandable())
    }

    /// False for plain nodes and unknown ids.
    pub fn is_open(&self, id: NodeId) -> bool {
        self.get_node(id).is_some_and(|n| n.is_open())
    }

    /// Expandable and has at least one child.
    pub fn can_expand(&self, id: NodeId) -> bool {
        self.get_node(id).is_some_and(|n| n.can_expand())
    }

    /// Direct assignment of the open flag. A leaf may be opened; it simply
    /// has nothing to reveal.
    #[instrument(level = "debug", skip(self))]
    pub fn set_open(&mut self, id: NodeId, open: bool) -> TreeResult<()> {
        let node = self.get_node_mut(id).ok_or(TreeError::NodeNotFound(id))?;
        let expansion = node
            .expansion
            .as_mut()
            .ok_or(TreeError::NotExpandable(id))?;
        expansion.is_open = open;
        Ok(())
    }

    /// Flips the open flag and returns the new state.
    pub fn toggle(&mut self, id: NodeId) -> TreeResult<bool> {
        let open = !self.is_open(id);
        self.set_open(id, open)?;
        Ok(open)
    }

    /// Sets the open flag on every expandable node of the subtree. Plain
    /// nodes are skipped.
    #[instrument(level = "debug", skip(self))]
    pub fn set_open_all(&mut self, id: NodeId, open: bool) -> TreeResult<()> {
        if !self.contains(id) {
            return Err(TreeError::NodeNotFound(id));
        }
        let targets: Vec<NodeId> = self
            .iter_from(id)
            .filter(|(_, node)| node.is_expandable())
            .map(|(i, _)| i)
            .collect();
        debug!("setting open={} on {} nodes", open, targets.len());

        for target in targets {
            if let Some(expansion) = self.get_node_mut(target).and_then(|n| n.expansion.as_mut()) {
                expansion.is_open = open;
            }
        }
        Ok(())
    }

    /// Nodes an outline view rooted at `id` would display, in order.
    ///
    /// Every visited node is listed. An open node that can expand visits
    /// each of its children: expandable children are walked recursively,
    /// plain children are listed without descending into them.
    ///
    /// `None` if `id` is unknown or not expandable.
    #[instrument(level = "debug", skip(self))]
    pub fn visible_list(&self, id: NodeId) -> Option<Vec<NodeId>> {
        if !self.is_expandable(id) {
            return None;
        }
        let mut visible = Vec::new();
        self.collect_visible(id, &mut visible);

        if visible.is_empty() {
            None
        } else {
            Some(visible)
        }
    }

    /// Rows an open node adds below itself; 0 when closed.
    pub fn reveal_count(&self, id: NodeId) -> usize {
        if !self.is_open(id) {
            return 0;
        }
        self.visible_list(id)
            .map_or(0, |visible| visible.len().saturating_sub(1))
    }

    fn collect_visible(&self, id: NodeId, visible: &mut Vec<NodeId>) {
        let Some(node) = self.get_node(id) else {
            return;
        };
        visible.push(id);
        if !(node.can_expand() && node.is_open()) {
            return;
        }

        for &child in node.children() {
            match self.get_node(child) {
                Some(c) if c.is_expandable() => self.collect_visible(child, visible),
                Some(_) => visible.push(child),
                None => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_expandable_node_is_closed() {
        let mut tree = TreeArena::new();
        let id = tree.insert_expandable("x");
        assert!(tree.is_expandable(id));
        assert!(!tree.is_open(id));
        assert!(!tree.can_expand(id));
    }

    #[test]
    fn test_set_open_on_plain_node_fails() {
        let mut tree = TreeArena::new();
        let id = tree.insert("plain");
        assert_eq!(tree.set_open(id, true), Err(TreeError::NotExpandable(id)));
    }

    #[test]
    fn test_make_expandable_keeps_existing_state() {
        let mut tree = TreeArena::new();
        let id = tree.insert_expandable("x");
        tree.set_open(id, true).unwrap();
        tree.make_expandable(id).unwrap();
        assert!(tree.is_open(id));
    }

    #[test]
    fn test_toggle_flips_state() {
        let mut tree = TreeArena::new();
        let id = tree.insert_expandable("x");
        assert_eq!(tree.toggle(id), Ok(true));
        assert_eq!(tree.toggle(id), Ok(false));
    }
}

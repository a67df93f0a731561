use std::fmt::Display;

use termtree::Tree;
use tracing::instrument;

use crate::arena::{NodeId, TreeArena};
use crate::node::NodeRef;

pub trait TreeNodeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

impl<T: Display> TreeNodeConvert for NodeRef<'_, T> {
    fn to_tree_string(&self) -> Tree<String> {
        let leaves: Vec<_> = self.children().map(|c| c.to_tree_string()).collect();
        Tree::new(self.value().to_string()).with_leaves(leaves)
    }
}

/// Box-drawing tree of the subtree rooted at `id`, or of every root when
/// `id` is `None`.
#[instrument(level = "debug", skip(arena))]
pub fn to_tree_strings<T: Display>(arena: &TreeArena<T>, id: Option<NodeId>) -> Vec<Tree<String>> {
    match id {
        Some(id) => arena.node(id).map(|n| n.to_tree_string()).into_iter().collect(),
        None => arena
            .roots()
            .filter_map(|root| arena.node(root))
            .map(|n| n.to_tree_string())
            .collect(),
    }
}

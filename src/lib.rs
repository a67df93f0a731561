//! Arena-backed ordered tree with depth tracking, depth-first search and
//! flattening, and a collapsible outline view.
//!
//! ```
//! use outline_tree::TreeArena;
//!
//! let mut tree = TreeArena::new();
//! let root = tree.insert_expandable("R");
//! let a = tree.insert_expandable("A");
//! let b = tree.insert_expandable("B");
//! let c = tree.insert_expandable("C");
//! tree.attach_all(root, [a, b]).unwrap();
//! tree.attach(b, c).unwrap();
//! tree.set_open(root, true).unwrap();
//! tree.set_open(b, true).unwrap();
//!
//! assert_eq!(tree.visible_list(root), Some(vec![root, a, b, c]));
//! assert_eq!(tree.reveal_count(root), 3);
//! ```

pub mod arena;
pub mod cli;
pub mod config;
pub mod errors;
pub mod expandable;
pub mod node;
pub mod render;
pub mod sample;
pub mod tree_traits;
pub mod util;

pub use arena::{NodeId, TreeArena};
pub use config::OutlineSettings;
pub use errors::{TreeError, TreeResult};
pub use expandable::Expansion;
pub use node::{NodeRef, TreeNode};
pub use render::OutlineRenderer;

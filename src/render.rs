//! Indentation-based outline rendering.

use std::fmt::Display;

use tracing::instrument;

use crate::arena::{NodeId, TreeArena};
use crate::config::OutlineSettings;
use crate::node::NodeRef;

/// Renders nodes as `marker * (depth + 1)`, an optional `"{depth}."`
/// prefix, then the value.
#[derive(Debug, Clone, Default)]
pub struct OutlineRenderer {
    settings: OutlineSettings,
}

impl OutlineRenderer {
    pub fn new(settings: OutlineSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &OutlineSettings {
        &self.settings
    }

    pub fn render_line<T: Display>(&self, node: NodeRef<'_, T>) -> String {
        let depth = node.depth();
        let width = if self.settings.indent_root { depth + 1 } else { depth };

        let mut line = self.settings.marker.repeat(width);
        if self.settings.level_prefix {
            line.push_str(&format!("{}.", depth));
        }
        line.push_str(&node.value().to_string());
        line
    }

    /// One line per id, in the given order. Stale ids are skipped.
    pub fn render_nodes<T: Display>(&self, arena: &TreeArena<T>, ids: &[NodeId]) -> Vec<String> {
        ids.iter()
            .filter_map(|&id| arena.node(id))
            .map(|node| self.render_line(node))
            .collect()
    }

    /// Lines of the visible outline rooted at `id`; empty when `id` is not
    /// expandable.
    #[instrument(level = "debug", skip(self, arena))]
    pub fn render_visible<T: Display>(&self, arena: &TreeArena<T>, id: NodeId) -> Vec<String> {
        arena
            .visible_list(id)
            .map(|visible| self.render_nodes(arena, &visible))
            .unwrap_or_default()
    }
}

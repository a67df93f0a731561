use std::io::{self, Write};

use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands};
use crate::cli::output;
use crate::config::OutlineSettings;
use crate::errors::TreeResult;
use crate::render::OutlineRenderer;
use crate::sample::{device_catalogue, Catalogue};
use crate::tree_traits::TreeNodeConvert;

pub fn execute_command(cli: &Cli) -> TreeResult<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    execute_command_to(cli, &mut out)
}

/// Runs the command, writing its output to `out`. Warnings go to stderr.
pub fn execute_command_to<W: Write>(cli: &Cli, out: &mut W) -> TreeResult<()> {
    let settings = resolve_settings(cli)?;
    let renderer = OutlineRenderer::new(settings);
    let mut catalogue = device_catalogue()?;

    match &cli.command {
        Some(Commands::Outline {
            all_open,
            collapse,
            expand,
        }) => _outline(out, &mut catalogue, &renderer, *all_open, collapse, expand),
        Some(Commands::Tree) => _tree(out, &catalogue),
        Some(Commands::Find { value }) => _find(out, &catalogue, value),
        Some(Commands::Flatten { leaves }) => _flatten(out, &catalogue, &renderer, *leaves),
        None => _outline(out, &mut catalogue, &renderer, false, &[], &[]),
    }
}

/// Config layers first, then command line flags on top.
fn resolve_settings(cli: &Cli) -> TreeResult<OutlineSettings> {
    let mut settings = OutlineSettings::load(cli.config.as_deref())?;
    if cli.level_prefix {
        settings.level_prefix = true;
    }
    if let Some(marker) = &cli.marker {
        settings.marker = marker.clone();
    }
    settings.validate()?;
    debug!("settings: {:?}", settings);
    Ok(settings)
}

#[instrument(skip(out, catalogue, renderer))]
fn _outline<W: Write>(
    out: &mut W,
    catalogue: &mut Catalogue,
    renderer: &OutlineRenderer,
    all_open: bool,
    collapse: &[String],
    expand: &[String],
) -> TreeResult<()> {
    let root = catalogue.root;
    if all_open {
        catalogue.tree.set_open_all(root, true)?;
    }
    for value in expand {
        set_open_by_value(catalogue, value, true)?;
    }
    for value in collapse {
        set_open_by_value(catalogue, value, false)?;
    }

    for line in renderer.render_visible(&catalogue.tree, root) {
        output::info(out, &line)?;
    }
    Ok(())
}

fn set_open_by_value(catalogue: &mut Catalogue, value: &str, open: bool) -> TreeResult<()> {
    match catalogue.tree.find(catalogue.root, &value) {
        Some(id) => catalogue.tree.set_open(id, open),
        None => {
            output::warning(&format!("no node named '{}'", value));
            Ok(())
        }
    }
}

#[instrument(skip(out, catalogue))]
fn _tree<W: Write>(out: &mut W, catalogue: &Catalogue) -> TreeResult<()> {
    if let Some(root) = catalogue.tree.node(catalogue.root) {
        output::info(out, &root.to_tree_string())?;
    }
    Ok(())
}

#[instrument(skip(out, catalogue))]
fn _find<W: Write>(out: &mut W, catalogue: &Catalogue, value: &str) -> TreeResult<()> {
    let tree = &catalogue.tree;
    let Some(node) = tree
        .find(catalogue.root, &value)
        .and_then(|id| tree.node(id))
    else {
        output::warning(&format!("no node named '{}'", value));
        return Ok(());
    };

    output::header(out, node.value())?;
    output::field(out, "depth", &node.depth())?;
    output::field(out, "height", &node.height())?;
    output::field(out, "open", &node.is_open())?;
    output::field(out, "reveals", &tree.reveal_count(node.id()))?;
    output::field(out, "description", &node)?;
    Ok(())
}

#[instrument(skip(out, catalogue, renderer))]
fn _flatten<W: Write>(
    out: &mut W,
    catalogue: &Catalogue,
    renderer: &OutlineRenderer,
    leaves: bool,
) -> TreeResult<()> {
    let tree = &catalogue.tree;
    if let Some(nodes) = tree.flatten(catalogue.root, leaves) {
        for line in renderer.render_nodes(tree, &nodes) {
            output::info(out, &line)?;
        }
    }
    Ok(())
}

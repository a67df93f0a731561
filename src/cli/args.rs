//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Ordered tree with a collapsible outline view
#[derive(Parser, Debug)]
#[command(name = "outline-tree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Log verbosity on stderr (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Config file layered over the global config
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Prefix each outline line with its depth
    #[arg(long, global = true)]
    pub level_prefix: bool,

    /// Indentation marker
    #[arg(long, global = true)]
    pub marker: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the visible outline of the catalogue
    Outline {
        /// Open every expandable node first
        #[arg(long)]
        all_open: bool,

        /// Close the first node with this value (repeatable)
        #[arg(long, value_name = "VALUE")]
        collapse: Vec<String>,

        /// Open the first node with this value (repeatable)
        #[arg(long, value_name = "VALUE")]
        expand: Vec<String>,
    },

    /// Print the whole catalogue as a box-drawing tree
    Tree,

    /// Find a node by value and describe it
    Find {
        /// Value to search for
        value: String,
    },

    /// Print the catalogue flattened in pre-order
    Flatten {
        /// Include leaf nodes
        #[arg(short, long)]
        leaves: bool,
    },
}

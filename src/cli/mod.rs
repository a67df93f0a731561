//! Command line front end over the sample catalogue

pub mod args;
pub mod commands;
pub mod output;

pub use args::{Cli, Commands};
pub use commands::{execute_command, execute_command_to};

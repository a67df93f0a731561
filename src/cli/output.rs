//! Terminal output formatting with colors
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.

use std::fmt::Display;
use std::io::{self, Write};

use colored::Colorize;

/// Print error (red bold "error:" prefix) to stderr
pub fn error(msg: &(impl Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// Print warning (yellow "Warning:" prefix) to stderr
pub fn warning(msg: &(impl Display + ?Sized)) {
    eprintln!("{}: {}", "Warning".yellow(), msg);
}

/// Write section header (cyan bold)
pub fn header<W: Write>(out: &mut W, msg: &(impl Display + ?Sized)) -> io::Result<()> {
    writeln!(out, "{}", msg.to_string().cyan().bold())
}

/// Write "label: value" with a green label
pub fn field<W: Write>(out: &mut W, label: &str, msg: &(impl Display + ?Sized)) -> io::Result<()> {
    writeln!(out, "{}: {}", label.green(), msg)
}

/// Write plain output (no color)
pub fn info<W: Write>(out: &mut W, msg: &(impl Display + ?Sized)) -> io::Result<()> {
    writeln!(out, "{}", msg)
}

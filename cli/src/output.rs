//! Output formatting utilities for CLI commands

use colored::Colorize;

/// Print success message
pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// Print a labelled field, label aligned to the given width
pub fn field(label: &str, value: impl std::fmt::Display) {
    println!("  {:<16} {}", format!("{}:", label).bold(), value);
}

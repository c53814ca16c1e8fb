//! Output formatting utilities

use console::style;

/// Print a success message
pub fn success(message: &str) {
    println!("{} {}", style("✓").green().bold(), message);
}

/// Print a warning message
pub fn warning(message: &str) {
    eprintln!("{} {}", style("!").yellow().bold(), message);
}

/// Print an info message
pub fn info(message: &str) {
    println!("{} {}", style("→").blue(), message);
}

/// Create a styled key-value line with the key padded to `width`
pub fn key_value(key: &str, value: impl std::fmt::Display, width: usize) -> String {
    let label = format!("{:<width$}", format!("{key}:"), width = width + 1);
    format!("  {} {}", style(label).dim(), value)
}

/// Print a pretty JSON document to stdout
pub fn json(value: &serde_json::Value) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

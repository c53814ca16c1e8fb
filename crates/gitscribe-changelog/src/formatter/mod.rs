//! Changelog rendering

mod cleanup;
mod markdown;

pub use cleanup::clean_description;
pub use markdown::{group_entries, render_sections, MarkdownFormatter, DEFAULT_MIN_ENTRY_LENGTH};

use crate::types::ChangelogEntry;

/// Trait for changelog formatters
pub trait ChangelogFormatter: Send + Sync {
    /// Render entries as the body of an Unreleased block; empty when nothing
    /// survives rendering
    fn render(&self, entries: &[ChangelogEntry]) -> String;
}

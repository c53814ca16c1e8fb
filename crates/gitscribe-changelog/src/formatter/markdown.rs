//! Markdown changelog formatter

use tracing::{debug, instrument};

use super::{clean_description, ChangelogFormatter};
use crate::types::{ChangelogEntry, CommitType, Section};

/// Default minimum length of a cleaned description
pub const DEFAULT_MIN_ENTRY_LENGTH: usize = 10;

/// Markdown changelog formatter
#[derive(Debug, Clone)]
pub struct MarkdownFormatter {
    /// Cleaned descriptions shorter than this are skipped
    pub min_entry_length: usize,
}

impl MarkdownFormatter {
    /// Create a new markdown formatter
    pub fn new() -> Self {
        Self {
            min_entry_length: DEFAULT_MIN_ENTRY_LENGTH,
        }
    }

    /// Set the minimum entry length
    pub fn with_min_entry_length(mut self, min: usize) -> Self {
        self.min_entry_length = min;
        self
    }

    /// Render one entry as a line, or `None` when cleanup leaves too little
    pub fn render_line(&self, entry: &ChangelogEntry) -> Option<String> {
        let text = clean_description(&entry.description);
        if text.chars().count() < self.min_entry_length {
            debug!(hash = %entry.hash, description = %entry.description, "Entry too short after cleanup");
            return None;
        }

        Some(match &entry.scope {
            Some(scope) => format!("**{}**: {}", scope, text),
            None => format!("- {}", text),
        })
    }
}

impl Default for MarkdownFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangelogFormatter for MarkdownFormatter {
    #[instrument(skip(self, entries), fields(entry_count = entries.len()))]
    fn render(&self, entries: &[ChangelogEntry]) -> String {
        let sections: Vec<(String, Vec<String>)> = group_entries(entries)
            .into_iter()
            .filter_map(|section| {
                let lines: Vec<String> = section
                    .entries
                    .iter()
                    .filter_map(|e| self.render_line(e))
                    .collect();
                (!lines.is_empty()).then_some((section.title, lines))
            })
            .collect();

        debug!(section_count = sections.len(), "Rendered changelog sections");
        render_sections(&sections)
    }
}

/// Group entries into sections in render order, dropping empty ones.
/// Input order is kept within a section.
pub fn group_entries(entries: &[ChangelogEntry]) -> Vec<Section> {
    CommitType::ALL
        .iter()
        .map(|commit_type| {
            let mut section = Section::new(commit_type.section_title());
            section.entries = entries
                .iter()
                .filter(|e| e.commit_type == *commit_type)
                .cloned()
                .collect();
            section
        })
        .filter(|section| !section.is_empty())
        .collect()
}

/// Render `(title, lines)` groups as `### Title` blocks separated by a blank line
pub fn render_sections(sections: &[(String, Vec<String>)]) -> String {
    sections
        .iter()
        .filter(|(_, lines)| !lines.is_empty())
        .map(|(title, lines)| format!("### {}\n\n{}", title, lines.join("\n")))
        .collect::<Vec<_>>()
        .join("\n\n")
}

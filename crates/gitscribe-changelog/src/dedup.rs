//! Near-duplicate collapsing
//!
//! Two passes share one rule: items with the same key collapse into the one
//! with the longer raw text, at the position of the key's first occurrence.
//! Ties keep the earlier item.

use std::collections::HashMap;
use std::hash::Hash;

use regex::Regex;
use std::sync::LazyLock;

use crate::types::{ChangelogEntry, CommitType};

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("Invalid regex"));

static BULLET_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-*+]\s+").expect("Invalid regex"));

static BOLD_SCOPE_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\*\*[^*]+\*\*:\s*").expect("Invalid regex"));

/// `[ABC-123]`, `ABC-123:`, `#123:` and similar tracker references.
/// Project keys are upper-case so words like `utf-8` are left alone.
static TICKET_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\[[A-Z][A-Z0-9]+-\d+\]|[A-Z][A-Z0-9]+-\d+:|\(#\d+\)|#\d+:?)\s*")
        .expect("Invalid regex")
});

/// Lower-case and collapse whitespace
pub fn normalize_description(text: &str) -> String {
    WHITESPACE
        .replace_all(text.trim(), " ")
        .to_lowercase()
}

/// Normalise a rendered changelog line so differently formatted renderings
/// of the same change compare equal
pub fn normalize_line(line: &str) -> String {
    let line = line.trim();
    let line = BULLET_PREFIX.replace(line, "");
    let line = BOLD_SCOPE_PREFIX.replace(&line, "");
    let line = TICKET_PREFIX.replace(&line, "");
    normalize_description(&line)
}

fn keep_longest<T, K, F, L>(items: Vec<T>, key: F, len: L) -> Vec<T>
where
    K: Eq + Hash,
    F: Fn(&T) -> K,
    L: Fn(&T) -> usize,
{
    let mut kept: Vec<T> = Vec::with_capacity(items.len());
    let mut positions: HashMap<K, usize> = HashMap::new();

    for item in items {
        let k = key(&item);
        match positions.get(&k).copied() {
            Some(pos) => {
                if len(&item) > len(&kept[pos]) {
                    kept[pos] = item;
                }
            }
            None => {
                positions.insert(k, kept.len());
                kept.push(item);
            }
        }
    }

    kept
}

/// Collapse entries sharing `(type, scope, normalized description)`
pub fn dedupe_entries(entries: Vec<ChangelogEntry>) -> Vec<ChangelogEntry> {
    keep_longest(
        entries,
        |e: &ChangelogEntry| -> (CommitType, Option<String>, String) {
            (
                e.commit_type,
                e.scope.clone(),
                normalize_description(&e.description),
            )
        },
        |e| e.description.chars().count(),
    )
}

/// Collapse `(section title, rendered line)` pairs from old and new content
pub fn dedupe_lines(lines: Vec<(String, String)>) -> Vec<(String, String)> {
    keep_longest(
        lines,
        |(title, line): &(String, String)| (title.trim().to_lowercase(), normalize_line(line)),
        |(_, line)| line.chars().count(),
    )
}

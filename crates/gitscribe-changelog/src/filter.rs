//! Changelog-worthiness filter
//!
//! Include by default; drop only obvious noise. Checks run against the
//! lower-cased, trimmed description before any render-time cleanup.

use regex::Regex;
use std::sync::LazyLock;

use crate::types::ChangelogEntry;

static NOISE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        // merge commits that slipped past the query
        r"^merge (branch|pull request|remote-tracking branch|tag|commit)\b",
        r"^merged? '?[\w./-]+'? into '?[\w./-]+'?$",
        // chatter from commit tooling
        r"found \d+ staged files?",
        r"generating ai commit message",
        r"ai commit message generated",
        r"analyzing staged changes",
        // changelog maintenance
        r"^(update|regenerate|generate)d? (the )?changelog\b",
        r"\[skip ci\]",
        // placeholders
        r"^(wip|temp|tmp)\b",
        // a lone filename
        r"^[\w-]+\.[a-z0-9]+$",
        // a lone verb
        r"^(update|fix|add|remove|change|delete|create|test|debug)$",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("Invalid regex"))
    .collect()
});

/// Whether an entry should appear in the changelog
pub fn is_worthy(entry: &ChangelogEntry) -> bool {
    is_worthy_description(&entry.description)
}

/// Description-level check behind [`is_worthy`]
pub fn is_worthy_description(description: &str) -> bool {
    let normalized = description.trim().to_lowercase();
    if normalized.is_empty() {
        return false;
    }
    !NOISE_PATTERNS.iter().any(|re| re.is_match(&normalized))
}

//! Per-entry text cleanup applied right before rendering

use regex::Regex;
use std::sync::LazyLock;

/// The verb must stand alone, so `add-on` and `fix-up` are kept
static LEADING_VERB: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(add|fix|update|remove)(?:[\s:]+|$)").expect("Invalid regex")
});

static FILENAME_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^[\w./-]+\.(rs|toml|lock|js|jsx|ts|tsx|mjs|cjs|json|md|mdx|ya?ml|py|go|java|kt|swift|rb|php|c|h|cpp|css|scss|html|txt|sh|sql|env)$",
    )
    .expect("Invalid regex")
});

fn is_edge_punctuation(c: char) -> bool {
    c.is_whitespace() || matches!(c, '.' | ',' | ';' | ':' | '!' | '?' | '-')
}

/// Whether `text` opens with two or more consecutive capitals, e.g. `API`
fn starts_with_acronym(text: &str) -> bool {
    let mut chars = text.chars();
    matches!(
        (chars.next(), chars.next()),
        (Some(a), Some(b)) if a.is_uppercase() && b.is_uppercase()
    )
}

/// Clean a description for display.
///
/// Strips a leading `add`/`fix`/`update`/`remove`, drops standalone filename
/// tokens, collapses whitespace, trims edge punctuation and lower-cases the
/// first letter unless the text opens with an acronym.
pub fn clean_description(description: &str) -> String {
    let without_verb = LEADING_VERB.replace(description, "");

    let joined = without_verb
        .split_whitespace()
        .filter(|token| {
            let core = token.trim_end_matches([',', ';', ':', '.', ')']);
            !FILENAME_TOKEN.is_match(core)
        })
        .collect::<Vec<_>>()
        .join(" ");

    let trimmed = joined.trim_matches(is_edge_punctuation);

    if starts_with_acronym(trimmed) {
        return trimmed.to_string();
    }

    let mut chars = trimmed.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

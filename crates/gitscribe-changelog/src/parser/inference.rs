//! Keyword-based type inference for messages that are not conventional

use crate::types::CommitType;

/// Keyword groups checked in priority order; the first group with a hit wins
const KEYWORD_GROUPS: &[(&[&str], CommitType)] = &[
    (&["fix", "bug", "error"], CommitType::Fix),
    (&["test", "spec"], CommitType::Test),
    (&["doc", "readme"], CommitType::Docs),
    (&["refactor", "cleanup"], CommitType::Refactor),
    (&["performance", "optimize"], CommitType::Perf),
    (&["security", "vulnerability"], CommitType::Security),
    (&["ci", "pipeline", "workflow"], CommitType::Ci),
    (&["dependency", "deps", "version"], CommitType::Chore),
];

/// Infer a commit type by case-insensitive substring search.
///
/// Matching is plain substring containment, so `"specific"` hits `spec`.
/// Falls back to [`CommitType::Feat`].
pub fn infer_type(message: &str) -> CommitType {
    let lower = message.to_lowercase();

    KEYWORD_GROUPS
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(_, commit_type)| *commit_type)
        .unwrap_or(CommitType::Feat)
}

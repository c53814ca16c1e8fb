//! Conventional Commits parser
//!
//! Parses `type(scope)!: description` headers where `type` is one of the
//! closed [`CommitType`] vocabulary. Anything else is classified by keyword
//! inference and keeps the whole message as its description.

use regex::Regex;
use std::sync::LazyLock;

use super::inference::infer_type;
use super::CommitParser;
use crate::types::{ChangelogEntry, CommitRecord, CommitType};

/// Regex for parsing conventional commit headers
static CONVENTIONAL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<type>feat|fix|docs|style|refactor|perf|test|chore|ci|build|security)(?:\((?P<scope>[^)]+)\))?(?P<breaking>!)?: (?P<description>.+)$",
    )
    .expect("Invalid regex")
});

/// Structured view of a commit header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedMessage {
    pub commit_type: CommitType,
    pub scope: Option<String>,
    pub description: String,
    pub breaking: bool,
    /// Whether the header matched the conventional format
    pub conventional: bool,
}

/// Parse the first line of a commit message.
///
/// Returns `None` only for blank messages.
pub fn parse_message(message: &str) -> Option<ParsedMessage> {
    let line = message.lines().next().unwrap_or("");
    if line.trim().is_empty() {
        return None;
    }

    if let Some(caps) = CONVENTIONAL_REGEX.captures(line) {
        let description = caps.name("description")?.as_str();
        if !description.trim().is_empty() {
            let commit_type = caps.name("type")?.as_str().parse().ok()?;
            return Some(ParsedMessage {
                commit_type,
                scope: caps.name("scope").map(|m| m.as_str().to_string()),
                description: description.to_string(),
                breaking: caps.name("breaking").is_some(),
                conventional: true,
            });
        }
    }

    Some(ParsedMessage {
        commit_type: infer_type(line),
        scope: None,
        description: line.to_string(),
        breaking: false,
        conventional: false,
    })
}

/// Parser for Conventional Commits format with heuristic fallback
#[derive(Debug, Default)]
pub struct ConventionalParser;

impl ConventionalParser {
    /// Create a new parser
    pub fn new() -> Self {
        Self
    }
}

impl CommitParser for ConventionalParser {
    fn parse(&self, commit: &CommitRecord) -> Option<ChangelogEntry> {
        let parsed = parse_message(&commit.message)?;

        Some(ChangelogEntry {
            commit_type: parsed.commit_type,
            scope: parsed.scope,
            description: parsed.description,
            breaking: parsed.breaking,
            hash: commit.hash.clone(),
        })
    }
}

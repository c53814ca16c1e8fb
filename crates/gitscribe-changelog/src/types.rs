//! Changelog types

use std::fmt;

use gitscribe_git::CommitInfo;
use serde::{Deserialize, Serialize};

/// A commit as seen by the changelog engine: hash plus first message line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    /// Commit hash (full)
    pub hash: String,
    /// First line of the commit message
    pub message: String,
}

impl CommitRecord {
    /// Create a new record
    pub fn new(hash: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            hash: hash.into(),
            message: message.into(),
        }
    }
}

impl From<CommitInfo> for CommitRecord {
    fn from(info: CommitInfo) -> Self {
        Self {
            hash: info.hash,
            message: info.message,
        }
    }
}

/// Commit type enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommitType {
    /// New feature
    Feat,
    /// Bug fix
    Fix,
    /// Performance improvement
    Perf,
    /// Security fix or hardening
    Security,
    /// Refactoring
    Refactor,
    /// Documentation
    Docs,
    /// Tests
    Test,
    /// Chores (maintenance)
    Chore,
    /// CI configuration
    Ci,
    /// Build system
    Build,
    /// Code style (formatting, etc.)
    Style,
}

impl CommitType {
    /// Every type, in the order its section is rendered
    pub const ALL: [CommitType; 11] = [
        Self::Feat,
        Self::Fix,
        Self::Perf,
        Self::Security,
        Self::Refactor,
        Self::Docs,
        Self::Test,
        Self::Chore,
        Self::Ci,
        Self::Build,
        Self::Style,
    ];

    /// Changelog section title for this type
    pub fn section_title(&self) -> &'static str {
        match self {
            Self::Feat => "Added",
            Self::Fix => "Fixed",
            Self::Perf => "Performance",
            Self::Security => "Security",
            Self::Refactor => "Changed",
            Self::Docs => "Documentation",
            Self::Test => "Testing",
            Self::Chore => "Maintenance",
            Self::Ci => "CI/CD",
            Self::Build => "Build",
            Self::Style => "Code Style",
        }
    }

    /// The conventional-commit tag, e.g. `feat`
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Feat => "feat",
            Self::Fix => "fix",
            Self::Perf => "perf",
            Self::Security => "security",
            Self::Refactor => "refactor",
            Self::Docs => "docs",
            Self::Test => "test",
            Self::Chore => "chore",
            Self::Ci => "ci",
            Self::Build => "build",
            Self::Style => "style",
        }
    }

    /// Position of a section title in render order; unknown titles sort last
    pub fn section_rank(title: &str) -> usize {
        Self::ALL
            .iter()
            .position(|t| t.section_title().eq_ignore_ascii_case(title.trim()))
            .unwrap_or(Self::ALL.len())
    }
}

impl fmt::Display for CommitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CommitType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or(())
    }
}

/// A commit message parsed into changelog terms
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangelogEntry {
    /// Commit type
    pub commit_type: CommitType,
    /// Scope (optional, in parentheses)
    pub scope: Option<String>,
    /// Description, never blank
    pub description: String,
    /// Whether the header carried a `!` marker
    pub breaking: bool,
    /// Originating commit hash
    pub hash: String,
}

/// A rendered group of entries under one title
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    /// Section title
    pub title: String,
    /// Entries in this section
    pub entries: Vec<ChangelogEntry>,
}

impl Section {
    /// Create a new section
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            entries: Vec::new(),
        }
    }

    /// Check if section is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

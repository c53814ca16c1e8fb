//! Git types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Information about a git commit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitInfo {
    /// Commit hash (full)
    pub hash: String,
    /// Short hash (first 7 characters)
    pub short_hash: String,
    /// Commit message (first line)
    pub message: String,
    /// Author name
    pub author: String,
    /// Commit timestamp
    pub timestamp: DateTime<Utc>,
}

impl CommitInfo {
    /// Create a new CommitInfo
    pub fn new(
        hash: impl Into<String>,
        message: impl Into<String>,
        author: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        let hash = hash.into();
        let short_hash = hash.chars().take(7).collect();

        Self {
            hash,
            short_hash,
            message: message.into(),
            author: author.into(),
            timestamp,
        }
    }
}

/// Kind of change recorded for a staged path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileChange {
    Added,
    Modified,
    Deleted,
    Renamed,
    Other,
}

impl FileChange {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Added => "added",
            Self::Modified => "modified",
            Self::Deleted => "deleted",
            Self::Renamed => "renamed",
            Self::Other => "changed",
        }
    }
}

/// Snapshot of what is staged in the index relative to HEAD
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StagedChanges {
    /// Paths and the kind of change for each
    pub files: Vec<(String, FileChange)>,
    /// Unified diff text
    pub diff: String,
}

impl StagedChanges {
    /// Whether nothing is staged
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Staged paths only
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.iter().map(|(path, _)| path.as_str())
    }
}

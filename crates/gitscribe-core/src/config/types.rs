//! Configuration types

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Changelog generation settings
    pub changelog: ChangelogConfig,

    /// External AI command settings
    pub ai: AiConfig,

    /// Commit command behaviour
    pub commit: CommitConfig,
}

/// Changelog configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChangelogConfig {
    /// Changelog file path, relative to the repository root
    pub file: PathBuf,

    /// How many recent commits to scan when the document has no watermark
    pub fallback_commit_count: usize,

    /// Rendered entries shorter than this (in chars) are dropped
    pub min_entry_length: usize,

    /// Preamble used when bootstrapping a new document
    pub header: Option<String>,
}

impl Default for ChangelogConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from("CHANGELOG.md"),
            fallback_commit_count: 50,
            min_entry_length: 10,
            header: None,
        }
    }
}

/// External AI text-generation command
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// Binary to run (looked up on PATH)
    pub command: String,

    /// Arguments passed before the prompt is written to stdin
    pub args: Vec<String>,

    /// Seconds before the process is killed
    pub timeout_secs: u64,

    /// Staged diff is truncated to this many chars before prompting
    pub max_diff_chars: usize,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            command: "claude".to_string(),
            args: vec!["-p".to_string()],
            timeout_secs: 60,
            max_diff_chars: 12_000,
        }
    }
}

/// Commit command configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CommitConfig {
    /// Ask before creating the commit
    pub confirm: bool,

    /// Use a heuristic message when the AI command fails
    pub fallback_on_ai_failure: bool,
}

impl Default for CommitConfig {
    fn default() -> Self {
        Self {
            confirm: true,
            fallback_on_ai_failure: true,
        }
    }
}

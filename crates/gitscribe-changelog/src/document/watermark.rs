//! The progress marker embedded in the changelog document

use chrono::{DateTime, SecondsFormat, Utc};
use regex::Regex;
use std::sync::LazyLock;

static LAST_PROCESSED_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<!--\s*CI-LAST-PROCESSED:\s*(?P<hash>[^\s>]+)\s*-->").expect("Invalid regex")
});

/// Whole lines holding either half of a watermark pair, with their newline
static WATERMARK_LINE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*<!--\s*(?:Generated:|CI-LAST-PROCESSED:)[^\n]*?-->[ \t]*(?:\r?\n|$)")
        .expect("Invalid regex")
});

/// A watermark pair to stamp into the document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Watermark {
    /// Hash of the last processed commit
    pub commit: String,
    /// When the document was generated
    pub generated_at: DateTime<Utc>,
}

impl Watermark {
    /// Watermark for `commit`, generated now
    pub fn new(commit: impl Into<String>) -> Self {
        Self::at(commit, Utc::now())
    }

    /// Watermark with an explicit timestamp
    pub fn at(commit: impl Into<String>, generated_at: DateTime<Utc>) -> Self {
        Self {
            commit: commit.into(),
            generated_at,
        }
    }

    /// The two comment lines, without a trailing newline
    pub fn render(&self) -> String {
        format!(
            "<!-- Generated: {} Commit: {} -->\n<!-- CI-LAST-PROCESSED: {} -->",
            self.generated_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            self.commit,
            self.commit
        )
    }
}

/// Last processed commit recorded in `document`, if any
pub fn read_watermark(document: &str) -> Option<String> {
    LAST_PROCESSED_REGEX
        .captures(document)
        .and_then(|caps| caps.name("hash"))
        .map(|m| m.as_str().to_string())
}

/// Remove every watermark line from `document`
pub fn strip_watermarks(document: &str) -> String {
    WATERMARK_LINE_REGEX.replace_all(document, "").into_owned()
}

//! The persisted changelog document
//!
//! A document is a preamble, an `## [Unreleased]` block this crate owns,
//! a watermark pair right after that block, and released versions that are
//! never touched. Everything here is pure string transformation; reading and
//! writing the file is left to the generator.

mod body;
mod watermark;

pub use body::{merge_bodies, parse_body};
pub use watermark::{read_watermark, strip_watermarks, Watermark};

use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

/// Preamble for a freshly created document
pub const DEFAULT_PREAMBLE: &str = "# Changelog

All notable changes to this project will be documented in this file.

The format is based on [Keep a Changelog](https://keepachangelog.com/en/1.1.0/),
and this project adheres to [Semantic Versioning](https://semver.org/spec/v2.0.0.html).";

const UNRELEASED_HEADING: &str = "## [Unreleased]";

static UNRELEASED_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?mi)^##[ \t]+\[unreleased\][ \t]*\r?$").expect("Invalid regex")
});

static RELEASE_HEADING_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^##[ \t]").expect("Invalid regex"));

/// A document cut around its Unreleased block
#[derive(Debug, PartialEq, Eq)]
struct Parts<'a> {
    prefix: &'a str,
    /// Body of the Unreleased block; `None` when the block is missing
    unreleased: Option<&'a str>,
    suffix: &'a str,
}

fn split(document: &str) -> Parts<'_> {
    match UNRELEASED_REGEX.find(document) {
        Some(heading) => {
            let rest = &document[heading.end()..];
            let body_end = RELEASE_HEADING_REGEX
                .find(rest)
                .map(|m| m.start())
                .unwrap_or(rest.len());
            Parts {
                prefix: &document[..heading.start()],
                unreleased: Some(&rest[..body_end]),
                suffix: &rest[body_end..],
            }
        }
        None => {
            let at = RELEASE_HEADING_REGEX
                .find(document)
                .map(|m| m.start())
                .unwrap_or(document.len());
            Parts {
                prefix: &document[..at],
                unreleased: None,
                suffix: &document[at..],
            }
        }
    }
}

/// Content for a document that does not exist yet
pub fn bootstrap(preamble: Option<&str>) -> String {
    format!("{}\n", preamble.unwrap_or(DEFAULT_PREAMBLE).trim_end())
}

/// Merge freshly rendered sections into `document` and stamp `watermark`.
///
/// Stale watermark pairs are removed from the whole document first, so the
/// result carries exactly one pair, placed right after the Unreleased block.
pub fn merge_document(document: &str, new_content: &str, watermark: &Watermark) -> String {
    let cleaned = strip_watermarks(document);
    let parts = split(&cleaned);

    let content = match parts.unreleased {
        None => {
            debug!("No Unreleased block, inserting one");
            new_content.trim().to_string()
        }
        Some(existing) if existing.trim().is_empty() => new_content.trim().to_string(),
        Some(existing) => merge_bodies(existing, new_content),
    };

    let mut output = String::with_capacity(cleaned.len() + content.len() + 128);
    let prefix = parts.prefix.trim_end();
    if !prefix.is_empty() {
        output.push_str(prefix);
        output.push_str("\n\n");
    }
    output.push_str(UNRELEASED_HEADING);
    output.push_str("\n\n");
    if !content.is_empty() {
        output.push_str(&content);
        output.push_str("\n\n");
    }
    output.push_str(&watermark.render());
    output.push('\n');

    let suffix = parts.suffix.trim();
    if !suffix.is_empty() {
        output.push('\n');
        output.push_str(suffix);
        output.push('\n');
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn stamp(hash: &str) -> Watermark {
        Watermark::at(hash, Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap())
    }

    const NEW: &str = "### Added\n\n- dark mode toggle";

    #[test]
    fn test_split_without_unreleased() {
        let parts = split("# Changelog\n\nintro\n\n## [1.0.0] - 2024-01-01\n\n- first\n");
        assert_eq!(parts.prefix, "# Changelog\n\nintro\n\n");
        assert!(parts.unreleased.is_none());
        assert_eq!(parts.suffix, "## [1.0.0] - 2024-01-01\n\n- first\n");
    }

    #[test]
    fn test_split_with_unreleased() {
        let parts = split("# C\n\n## [Unreleased]\n\n### Added\n\n- x\n\n## [1.0.0]\n");
        assert_eq!(parts.prefix, "# C\n\n");
        assert_eq!(parts.unreleased, Some("\n\n### Added\n\n- x\n\n"));
        assert_eq!(parts.suffix, "## [1.0.0]\n");
    }

    #[test]
    fn test_insert_before_first_release() {
        let doc = "# Changelog\n\n## [1.0.0] - 2024-01-01\n\n- first release\n";
        let merged = merge_document(doc, NEW, &stamp("abc"));
        assert_eq!(
            merged,
            "# Changelog\n\n## [Unreleased]\n\n### Added\n\n- dark mode toggle\n\n\
             <!-- Generated: 2024-01-02T03:04:05.000Z Commit: abc -->\n\
             <!-- CI-LAST-PROCESSED: abc -->\n\n\
             ## [1.0.0] - 2024-01-01\n\n- first release\n"
        );
    }

    #[test]
    fn test_append_when_no_releases() {
        let merged = merge_document(&bootstrap(None), NEW, &stamp("abc"));
        assert!(merged.starts_with(DEFAULT_PREAMBLE));
        assert!(merged.ends_with("- dark mode toggle\n\n<!-- Generated: 2024-01-02T03:04:05.000Z Commit: abc -->\n<!-- CI-LAST-PROCESSED: abc -->\n"));
    }

    #[test]
    fn test_empty_block_with_stale_watermark_is_replaced() {
        let doc = "# C\n\n## [Unreleased]\n\n<!-- Generated: old Commit: 111 -->\n<!-- CI-LAST-PROCESSED: 111 -->\n\n## [1.0.0]\n";
        let merged = merge_document(doc, NEW, &stamp("222"));
        assert_eq!(
            merged,
            "# C\n\n## [Unreleased]\n\n### Added\n\n- dark mode toggle\n\n\
             <!-- Generated: 2024-01-02T03:04:05.000Z Commit: 222 -->\n\
             <!-- CI-LAST-PROCESSED: 222 -->\n\n## [1.0.0]\n"
        );
    }

    #[test]
    fn test_existing_content_is_merged() {
        let doc = "# C\n\n## [Unreleased]\n\n### Fixed\n\n- resolve timeout issue\n";
        let merged = merge_document(doc, NEW, &stamp("abc"));
        assert!(merged.contains("### Added\n\n- dark mode toggle\n\n### Fixed\n\n- resolve timeout issue\n\n<!-- Generated"));
    }

    #[test]
    fn test_stale_pairs_anywhere_are_removed() {
        let doc = "# C\n<!-- CI-LAST-PROCESSED: 1 -->\n\n## [Unreleased]\n\n## [0.1.0]\n\n<!-- Generated: x Commit: 2 -->\n<!-- CI-LAST-PROCESSED: 2 -->\n";
        let merged = merge_document(doc, NEW, &stamp("3"));
        assert_eq!(merged.matches("CI-LAST-PROCESSED").count(), 1);
        assert_eq!(merged.matches("<!-- Generated:").count(), 1);
        assert_eq!(read_watermark(&merged), Some("3".to_string()));
        assert!(merged.ends_with("## [0.1.0]\n"));
    }

    #[test]
    fn test_malformed_body_is_replaced() {
        let doc = "# C\n\n## [Unreleased]\n\nSome notes somebody typed by hand.\n\n## [1.0.0]\n";
        let incoming = "### Added\n\n- dark mode toggle\n\n### Fixed\n\n- resolve timeout issue";
        let merged = merge_document(doc, incoming, &stamp("abc"));
        assert!(merged.contains(&format!("## [Unreleased]\n\n{}\n\n<!-- Generated", incoming)));
        assert!(!merged.contains("somebody typed"));
    }

    #[test]
    fn test_merge_is_stable() {
        let once = merge_document(&bootstrap(None), NEW, &stamp("abc"));
        let twice = merge_document(&once, NEW, &stamp("abc"));
        assert_eq!(once, twice);
    }

    #[test]
    fn test_bootstrap_custom_preamble() {
        assert_eq!(bootstrap(Some("# History\n\n")), "# History\n");
    }
}

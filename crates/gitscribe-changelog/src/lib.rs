//! gitscribe Changelog - incremental changelog generation
//!
//! Turns raw commit messages into categorised Markdown and merges them into
//! the `## [Unreleased]` block of a Keep-a-Changelog style document. Progress
//! is tracked by a watermark comment embedded in the document itself, so a
//! run only ever looks at commits made after the previous one.
//!
//! The pipeline is parse, filter, dedupe, group and render, followed by the
//! document merge. Commit history is read through [`CommitSource`].

pub mod dedup;
pub mod document;
pub mod filter;
pub mod formatter;
pub mod generator;
pub mod parser;
pub mod source;
pub mod types;

pub use generator::{last_processed, ChangelogGenerator};
pub use parser::{CommitParser, ConventionalParser};
pub use source::{CommitRange, CommitSource};
pub use types::{ChangelogEntry, CommitRecord, CommitType, Section};

/// Result type for changelog operations
pub type Result<T> = std::result::Result<T, gitscribe_core::error::ChangelogError>;

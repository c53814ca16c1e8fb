//! Commit parsing

mod conventional;
mod inference;

pub use conventional::{parse_message, ConventionalParser, ParsedMessage};
pub use inference::infer_type;

use crate::types::{ChangelogEntry, CommitRecord};

/// Trait for commit parsers
pub trait CommitParser: Send + Sync {
    /// Parse a commit into a changelog entry; `None` when the message is blank
    fn parse(&self, commit: &CommitRecord) -> Option<ChangelogEntry>;
}

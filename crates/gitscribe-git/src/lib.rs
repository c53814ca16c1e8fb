//! gitscribe Git - git repository access for gitscribe
//!
//! This crate wraps `git2` with the queries the changelog engine and the
//! commit command need: HEAD lookup, oldest-first commit ranges with merges
//! excluded, working tree status, staged diffs and commit creation.

mod commits;
mod diff;
mod repository;
mod status;
pub mod types;

pub use repository::{GitRepo, Result};
pub use types::{CommitInfo, FileChange, StagedChanges};

//! Where commits come from

use gitscribe_core::error::GitError;
use gitscribe_git::GitRepo;

use crate::types::CommitRecord;

/// Which commits to read, always ending at HEAD
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitRange {
    /// Everything after this commit (exclusive)
    Since(String),
    /// The most recent `n` commits, or the whole history if shorter
    Recent(usize),
    /// The whole history
    All,
}

/// Read access to commit history.
///
/// Implementations return commits oldest-first with merge commits excluded.
pub trait CommitSource {
    /// Full hash of the current HEAD commit
    fn head_hash(&self) -> Result<String, GitError>;

    /// Commits in `range`
    fn commits(&self, range: &CommitRange) -> Result<Vec<CommitRecord>, GitError>;
}

impl CommitSource for GitRepo {
    fn head_hash(&self) -> Result<String, GitError> {
        GitRepo::head_hash(self)
    }

    fn commits(&self, range: &CommitRange) -> Result<Vec<CommitRecord>, GitError> {
        let commits = match range {
            CommitRange::Since(hash) => self.commits_since(hash)?,
            CommitRange::Recent(count) => self.recent_commits(*count)?,
            CommitRange::All => self.all_commits()?,
        };
        Ok(commits.into_iter().map(CommitRecord::from).collect())
    }
}

//! Commit history operations
//!
//! All range queries return commits oldest-first and skip merge commits
//! (any commit with more than one parent).

use chrono::{TimeZone, Utc};
use git2::{Oid, Sort};
use tracing::{debug, instrument};

use gitscribe_core::error::GitError;

use crate::repository::{GitRepo, Result};
use crate::types::CommitInfo;

impl GitRepo {
    /// Full hash of the HEAD commit
    pub fn head_hash(&self) -> Result<String> {
        Ok(self.head_commit()?.id().to_string())
    }

    /// Commits reachable from HEAD but not from `since` (exclusive lower bound)
    #[instrument(skip(self))]
    pub fn commits_since(&self, since: &str) -> Result<Vec<CommitInfo>> {
        let since_oid = self
            .repo
            .revparse_single(since)
            .and_then(|obj| obj.peel_to_commit())
            .map_err(|_| GitError::UnknownRevision(since.to_string()))?
            .id();
        self.walk_from_head(Some(since_oid), None)
    }

    /// The most recent `count` non-merge commits, or fewer if history is shorter
    #[instrument(skip(self))]
    pub fn recent_commits(&self, count: usize) -> Result<Vec<CommitInfo>> {
        self.walk_from_head(None, Some(count))
    }

    /// Every non-merge commit on the current branch
    pub fn all_commits(&self) -> Result<Vec<CommitInfo>> {
        self.walk_from_head(None, None)
    }

    fn walk_from_head(&self, hide: Option<Oid>, limit: Option<usize>) -> Result<Vec<CommitInfo>> {
        let head = match self.head_commit_opt()? {
            Some(head) => head,
            None => {
                debug!("HEAD is unborn, no commits to walk");
                return Ok(Vec::new());
            }
        };

        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;
        revwalk.push(head.id())?;
        if let Some(hide) = hide {
            revwalk.hide(hide)?;
        }

        let limit = limit.unwrap_or(usize::MAX);
        let mut commits = Vec::new();

        for oid in revwalk {
            if commits.len() >= limit {
                break;
            }
            let commit = self.repo.find_commit(oid?)?;
            if commit.parent_count() > 1 {
                continue;
            }
            commits.push(commit_to_info(&commit));
        }

        // revwalk yields newest-first
        commits.reverse();
        debug!(count = commits.len(), "collected commits");
        Ok(commits)
    }
}

/// Convert a git2 Commit to CommitInfo
fn commit_to_info(commit: &git2::Commit<'_>) -> CommitInfo {
    let message = commit.summary().unwrap_or("").to_string();

    let timestamp = Utc
        .timestamp_opt(commit.time().seconds(), 0)
        .single()
        .unwrap_or_else(Utc::now);

    CommitInfo::new(
        commit.id().to_string(),
        message,
        commit.author().name().unwrap_or("Unknown"),
        timestamp,
    )
}

//! Staged changes and commit creation

use git2::{Delta, DiffFormat, IndexAddOption};
use tracing::{debug, info, instrument};

use gitscribe_core::error::GitError;

use crate::repository::{GitRepo, Result};
use crate::types::{FileChange, StagedChanges};

impl GitRepo {
    /// Diff between HEAD (or the empty tree) and the index
    #[instrument(skip(self))]
    pub fn staged_changes(&self) -> Result<StagedChanges> {
        let head_tree = match self.head_commit_opt()? {
            Some(commit) => Some(commit.tree()?),
            None => None,
        };

        let diff = self
            .repo
            .diff_tree_to_index(head_tree.as_ref(), None, None)?;

        let files = diff
            .deltas()
            .filter_map(|delta| {
                let path = delta
                    .new_file()
                    .path()
                    .or_else(|| delta.old_file().path())?;
                let change = match delta.status() {
                    Delta::Added => FileChange::Added,
                    Delta::Modified => FileChange::Modified,
                    Delta::Deleted => FileChange::Deleted,
                    Delta::Renamed => FileChange::Renamed,
                    _ => FileChange::Other,
                };
                Some((path.to_string_lossy().to_string(), change))
            })
            .collect::<Vec<_>>();

        let mut text = String::new();
        diff.print(DiffFormat::Patch, |_delta, _hunk, line| {
            if matches!(line.origin(), '+' | '-' | ' ') {
                text.push(line.origin());
            }
            text.push_str(&String::from_utf8_lossy(line.content()));
            true
        })?;

        debug!(files = files.len(), diff_len = text.len(), "collected staged changes");
        Ok(StagedChanges { files, diff: text })
    }

    /// Stage modifications and deletions of already-tracked files
    pub fn stage_tracked_changes(&self) -> Result<()> {
        let mut index = self.repo.index()?;
        index.update_all(["*"], None)?;
        index.write()?;
        Ok(())
    }

    /// Stage every path matching `pathspec`, including untracked files
    pub fn stage_paths(&self, pathspec: &[&str]) -> Result<()> {
        let mut index = self.repo.index()?;
        index.add_all(pathspec.iter().copied(), IndexAddOption::DEFAULT, None)?;
        index.write()?;
        Ok(())
    }

    /// Commit the current index on HEAD, returning the new commit hash
    #[instrument(skip(self, message))]
    pub fn commit_staged(&self, message: &str) -> Result<String> {
        if self.staged_changes()?.is_empty() {
            return Err(GitError::NothingStaged);
        }

        let mut index = self.repo.index()?;
        let tree = self.repo.find_tree(index.write_tree()?)?;
        let signature = self.repo.signature()?;

        let parent = self.head_commit_opt()?;
        let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();

        let oid = self
            .repo
            .commit(Some("HEAD"), &signature, &signature, message, &tree, &parents)?;

        info!(hash = %oid, "created commit");
        Ok(oid.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use git2::Repository;
    use tempfile::TempDir;

    fn init_repo() -> (TempDir, GitRepo) {
        let temp = TempDir::new().unwrap();
        let repo = Repository::init(temp.path()).unwrap();
        let mut config = repo.config().unwrap();
        config.set_str("user.name", "Test").unwrap();
        config.set_str("user.email", "test@example.com").unwrap();
        let git_repo = GitRepo::open(temp.path()).unwrap();
        (temp, git_repo)
    }

    #[test]
    fn test_nothing_staged() {
        let (_temp, repo) = init_repo();
        assert!(repo.staged_changes().unwrap().is_empty());
        assert!(matches!(
            repo.commit_staged("feat: nothing"),
            Err(GitError::NothingStaged)
        ));
    }

    #[test]
    fn test_staged_changes_and_commit() {
        let (temp, repo) = init_repo();
        std::fs::write(temp.path().join("notes.md"), "hello\n").unwrap();
        repo.stage_paths(&["notes.md"]).unwrap();

        let staged = repo.staged_changes().unwrap();
        assert_eq!(staged.files, vec![("notes.md".to_string(), FileChange::Added)]);
        assert!(staged.diff.contains("+hello"));

        let hash = repo.commit_staged("docs: add notes").unwrap();
        assert_eq!(repo.head_hash().unwrap(), hash);
        assert!(repo.staged_changes().unwrap().is_empty());
    }

    #[test]
    fn test_stage_tracked_changes_skips_untracked() {
        let (temp, repo) = init_repo();
        std::fs::write(temp.path().join("a.txt"), "one\n").unwrap();
        repo.stage_paths(&["a.txt"]).unwrap();
        repo.commit_staged("chore: add a").unwrap();

        std::fs::write(temp.path().join("a.txt"), "two\n").unwrap();
        std::fs::write(temp.path().join("b.txt"), "new\n").unwrap();
        repo.stage_tracked_changes().unwrap();

        let staged = repo.staged_changes().unwrap();
        assert_eq!(staged.files, vec![("a.txt".to_string(), FileChange::Modified)]);
    }
}

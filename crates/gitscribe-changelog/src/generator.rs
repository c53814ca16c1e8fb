//! Changelog generation

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use gitscribe_core::config::ChangelogConfig;
use gitscribe_core::error::ChangelogError;
use tempfile::NamedTempFile;
use tracing::{debug, info, instrument};

use crate::dedup::dedupe_entries;
use crate::document::{self, read_watermark, Watermark};
use crate::filter::is_worthy;
use crate::formatter::{ChangelogFormatter, MarkdownFormatter};
use crate::parser::{CommitParser, ConventionalParser};
use crate::source::{CommitRange, CommitSource};
use crate::types::{ChangelogEntry, CommitRecord};
use crate::Result;

/// Changelog generator
pub struct ChangelogGenerator {
    parser: Box<dyn CommitParser>,
    formatter: Box<dyn ChangelogFormatter>,
    config: ChangelogConfig,
    path: PathBuf,
}

impl ChangelogGenerator {
    /// Create a generator for the document configured relative to `root`
    pub fn new(config: ChangelogConfig, root: &Path) -> Self {
        Self {
            parser: Box::new(ConventionalParser::new()),
            formatter: Box::new(
                MarkdownFormatter::new().with_min_entry_length(config.min_entry_length),
            ),
            path: root.join(&config.file),
            config,
        }
    }

    /// Use a custom parser
    pub fn with_parser<P: CommitParser + 'static>(mut self, parser: P) -> Self {
        self.parser = Box::new(parser);
        self
    }

    /// Use a custom formatter
    pub fn with_formatter<F: ChangelogFormatter + 'static>(mut self, formatter: F) -> Self {
        self.formatter = Box::new(formatter);
        self
    }

    /// Read and write a different document
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = path.into();
        self
    }

    /// Path of the changelog document
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Commits to process given the document's watermark
    pub fn range_for(&self, last_processed: Option<&str>) -> CommitRange {
        match last_processed {
            Some(hash) => CommitRange::Since(hash.to_string()),
            None => CommitRange::Recent(self.config.fallback_commit_count),
        }
    }

    /// Turn commits into changelog entries: parse, filter, dedupe
    pub fn entries(&self, commits: &[CommitRecord]) -> Vec<ChangelogEntry> {
        let parsed: Vec<ChangelogEntry> = commits
            .iter()
            .filter_map(|c| self.parser.parse(c))
            .collect();
        let parsed_count = parsed.len();

        let worthy: Vec<ChangelogEntry> = parsed.into_iter().filter(is_worthy).collect();
        let worthy_count = worthy.len();

        let entries = dedupe_entries(worthy);
        debug!(
            parsed_count,
            worthy_count,
            entry_count = entries.len(),
            "changelog entries built"
        );
        entries
    }

    /// Render the sections for `commits`, or `None` when nothing survives
    pub fn render(&self, commits: &[CommitRecord]) -> Option<String> {
        let rendered = self.formatter.render(&self.entries(commits));
        (!rendered.trim().is_empty()).then_some(rendered)
    }

    /// Render sections for commits not yet recorded in the document
    #[instrument(skip(self, source), fields(path = %self.path.display()))]
    pub fn render_pending<S: CommitSource + ?Sized>(&self, source: &S) -> Result<Option<String>> {
        let existing = self.read_document()?;
        self.render_after(source, existing.as_deref().and_then(read_watermark).as_deref())
    }

    fn render_after<S: CommitSource + ?Sized>(
        &self,
        source: &S,
        last_processed: Option<&str>,
    ) -> Result<Option<String>> {
        let range = self.range_for(last_processed);
        let commits = source.commits(&range)?;
        debug!(?range, commit_count = commits.len(), "queried commits");

        if commits.is_empty() {
            info!("No new commits since last changelog update");
            return Ok(None);
        }

        let rendered = self.render(&commits);
        if rendered.is_none() {
            info!(
                commit_count = commits.len(),
                "No changelog-worthy commits found"
            );
        }
        Ok(rendered)
    }

    /// Generate the changelog.
    ///
    /// In preview mode returns the new sections without touching the
    /// document. Otherwise merges them into the document, stamps the current
    /// HEAD, writes it atomically and returns the full document. `None` means
    /// there was nothing new to add.
    #[instrument(skip(self, source), fields(path = %self.path.display()))]
    pub fn generate<S: CommitSource + ?Sized>(
        &self,
        source: &S,
        preview: bool,
    ) -> Result<Option<String>> {
        let existing = self.read_document()?;
        let last_processed = existing.as_deref().and_then(read_watermark);

        let Some(rendered) = self.render_after(source, last_processed.as_deref())? else {
            return Ok(None);
        };

        if preview {
            return Ok(Some(rendered));
        }

        let head = source.head_hash()?;
        let base = existing
            .unwrap_or_else(|| document::bootstrap(self.config.header.as_deref()));
        let updated = document::merge_document(&base, &rendered, &Watermark::new(&head));

        self.persist(&updated)?;
        info!(head = %head, "Changelog updated");
        Ok(Some(updated))
    }

    fn read_document(&self) -> Result<Option<String>> {
        read_document(&self.path)
    }

    fn persist(&self, content: &str) -> Result<()> {
        let write_failed = |source: std::io::Error| ChangelogError::WriteFailed {
            path: self.path.clone(),
            source,
        };

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir).map_err(write_failed)?;

        let mut file = NamedTempFile::new_in(dir).map_err(write_failed)?;
        match fs::metadata(&self.path) {
            Ok(meta) => file
                .as_file()
                .set_permissions(meta.permissions())
                .map_err(write_failed)?,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                set_new_document_permissions(file.as_file()).map_err(write_failed)?
            }
            Err(e) => return Err(write_failed(e)),
        }
        file.write_all(content.as_bytes()).map_err(write_failed)?;
        file.persist(&self.path).map_err(|e| write_failed(e.error))?;

        debug!(bytes = content.len(), "changelog written");
        Ok(())
    }
}

/// Temp files are created owner-only; a fresh changelog is world-readable
#[cfg(unix)]
fn set_new_document_permissions(file: &fs::File) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn set_new_document_permissions(_file: &fs::File) -> std::io::Result<()> {
    Ok(())
}

fn read_document(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(source) => Err(ChangelogError::ReadFailed {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// The last processed commit recorded in the document at `path`
pub fn last_processed(path: &Path) -> Result<Option<String>> {
    Ok(read_document(path)?.as_deref().and_then(read_watermark))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::strip_watermarks;
    use gitscribe_core::error::GitError;
    use std::cell::RefCell;
    use tempfile::TempDir;

    /// Linear in-memory history, oldest first
    #[derive(Default)]
    struct FakeSource {
        commits: RefCell<Vec<CommitRecord>>,
    }

    impl FakeSource {
        fn with(messages: &[&str]) -> Self {
            let source = Self::default();
            for m in messages {
                source.push(m);
            }
            source
        }

        fn push(&self, message: &str) -> String {
            let mut commits = self.commits.borrow_mut();
            let hash = format!("{:040x}", commits.len() + 1);
            commits.push(CommitRecord::new(hash.clone(), message));
            hash
        }
    }

    impl CommitSource for FakeSource {
        fn head_hash(&self) -> std::result::Result<String, GitError> {
            self.commits
                .borrow()
                .last()
                .map(|c| c.hash.clone())
                .ok_or(GitError::NoCommits)
        }

        fn commits(&self, range: &CommitRange) -> std::result::Result<Vec<CommitRecord>, GitError> {
            let commits = self.commits.borrow();
            match range {
                CommitRange::Since(hash) => commits
                    .iter()
                    .position(|c| &c.hash == hash)
                    .map(|i| commits[i + 1..].to_vec())
                    .ok_or_else(|| GitError::UnknownRevision(hash.clone())),
                CommitRange::Recent(n) => Ok(commits[commits.len().saturating_sub(*n)..].to_vec()),
                CommitRange::All => Ok(commits.clone()),
            }
        }
    }

    fn generator(dir: &TempDir) -> ChangelogGenerator {
        ChangelogGenerator::new(ChangelogConfig::default(), dir.path())
    }

    fn bullet_lines(document: &str) -> Vec<String> {
        document
            .lines()
            .filter(|l| l.starts_with("- ") || l.starts_with("**"))
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_preview_renders_without_writing() {
        let temp = TempDir::new().unwrap();
        let source = FakeSource::with(&[
            "fix(api): resolve timeout issue",
            "add button component",
            "feat(ui): add responsive nav",
        ]);
        let generator = generator(&temp);

        let preview = generator.generate(&source, true).unwrap();

        assert_eq!(
            preview.as_deref(),
            Some("### Added\n\n- button component\n**ui**: responsive nav\n\n### Fixed\n\n**api**: resolve timeout issue")
        );
        assert!(!generator.path().exists());
    }

    #[test]
    fn test_first_run_bootstraps_document() {
        let temp = TempDir::new().unwrap();
        let source = FakeSource::with(&["feat: support yaml configuration"]);
        let generator = generator(&temp);

        let document = generator.generate(&source, false).unwrap().unwrap();

        assert!(document.starts_with("# Changelog\n"));
        assert!(document.contains("## [Unreleased]\n\n### Added\n\n- support yaml configuration\n"));
        assert_eq!(read_watermark(&document), source.head_hash().ok());
        assert_eq!(fs::read_to_string(generator.path()).unwrap(), document);
    }

    #[test]
    fn test_custom_header_used_for_bootstrap() {
        let temp = TempDir::new().unwrap();
        let config = ChangelogConfig {
            header: Some("# Release History".to_string()),
            ..ChangelogConfig::default()
        };
        let generator = ChangelogGenerator::new(config, temp.path());
        let source = FakeSource::with(&["feat: support yaml configuration"]);

        let document = generator.generate(&source, false).unwrap().unwrap();
        assert!(document.starts_with("# Release History\n\n## [Unreleased]"));
    }

    #[cfg(unix)]
    #[test]
    fn test_write_keeps_file_mode() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let generator = generator(&temp);
        fs::write(generator.path(), "# Changelog\n").unwrap();
        fs::set_permissions(generator.path(), fs::Permissions::from_mode(0o664)).unwrap();

        let source = FakeSource::with(&["feat: support yaml configuration"]);
        generator.generate(&source, false).unwrap().unwrap();

        let mode = fs::metadata(generator.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o664);
    }

    #[cfg(unix)]
    #[test]
    fn test_new_document_is_world_readable() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let generator = generator(&temp);
        let source = FakeSource::with(&["feat: support yaml configuration"]);
        generator.generate(&source, false).unwrap().unwrap();

        let mode = fs::metadata(generator.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o644);
    }

    #[test]
    fn test_second_run_without_commits_is_noop() {
        let temp = TempDir::new().unwrap();
        let source = FakeSource::with(&["feat: support yaml configuration"]);
        let generator = generator(&temp);

        generator.generate(&source, false).unwrap().unwrap();
        let before = fs::read(generator.path()).unwrap();

        assert!(generator.generate(&source, false).unwrap().is_none());
        assert_eq!(fs::read(generator.path()).unwrap(), before);
    }

    #[test]
    fn test_watermark_at_head_is_noop() {
        let temp = TempDir::new().unwrap();
        let generator = generator(&temp);
        let source = FakeSource::default();
        source.commits.borrow_mut().push(CommitRecord::new("abc123", "feat: something big"));

        let doc = "# Changelog\n\n## [Unreleased]\n\n<!-- Generated: 2024-01-01T00:00:00.000Z Commit: abc123 -->\n<!-- CI-LAST-PROCESSED: abc123 -->\n";
        fs::write(generator.path(), doc).unwrap();

        assert!(generator.generate(&source, false).unwrap().is_none());
        assert_eq!(fs::read_to_string(generator.path()).unwrap(), doc);
    }

    #[test]
    fn test_single_watermark_across_runs() {
        let temp = TempDir::new().unwrap();
        let source = FakeSource::default();
        let generator = generator(&temp);

        for message in [
            "feat: support yaml configuration",
            "fix: handle empty config file",
            "perf: cache parsed templates",
            "docs: describe the init command",
        ] {
            let head = source.push(message);
            let document = generator.generate(&source, false).unwrap().unwrap();

            assert_eq!(document.matches("CI-LAST-PROCESSED").count(), 1);
            assert_eq!(document.matches("<!-- Generated:").count(), 1);
            assert_eq!(read_watermark(&document), Some(head));
        }

        let document = fs::read_to_string(generator.path()).unwrap();
        assert_eq!(bullet_lines(&document).len(), 4);
        assert_eq!(document.matches("## [Unreleased]").count(), 1);
    }

    #[test]
    fn test_rerun_over_same_range_does_not_duplicate() {
        let temp = TempDir::new().unwrap();
        let source = FakeSource::with(&[
            "feat(ui): add responsive nav",
            "fix: handle empty config file",
        ]);
        let generator = generator(&temp);

        let first = generator.generate(&source, false).unwrap().unwrap();

        // lose the watermark so the same commits are processed again
        fs::write(generator.path(), strip_watermarks(&first)).unwrap();
        source.push("feat: support yaml configuration");
        let second = generator.generate(&source, false).unwrap().unwrap();

        let first_lines = bullet_lines(&first);
        let second_lines = bullet_lines(&second);
        assert_eq!(second_lines.len(), first_lines.len() + 1);
        assert!(first_lines.iter().all(|l| second_lines.contains(l)));
    }

    #[test]
    fn test_malformed_unreleased_block_is_replaced() {
        let temp = TempDir::new().unwrap();
        let source = FakeSource::with(&["chore: initial import"]);
        let base = source.head_hash().unwrap();
        source.push("feat: support yaml configuration");
        source.push("fix: handle empty config file");

        let generator = generator(&temp);
        let doc = format!(
            "# Changelog\n\n## [Unreleased]\n\nthis was edited }}{{ by hand\n\n<!-- CI-LAST-PROCESSED: {base} -->\n\n## [0.1.0] - 2024-01-01\n\n- first release\n"
        );
        fs::write(generator.path(), doc).unwrap();

        let document = generator.generate(&source, false).unwrap().unwrap();

        assert!(document.contains(
            "## [Unreleased]\n\n### Added\n\n- support yaml configuration\n\n### Fixed\n\n- handle empty config file\n\n<!-- Generated"
        ));
        assert!(!document.contains("edited"));
        assert!(document.ends_with("## [0.1.0] - 2024-01-01\n\n- first release\n"));
    }

    #[test]
    fn test_noise_only_yields_nothing() {
        let temp = TempDir::new().unwrap();
        let source = FakeSource::with(&["wip", "Merge branch 'main' into feature", "update"]);
        let generator = generator(&temp);

        assert!(generator.generate(&source, false).unwrap().is_none());
        assert!(!generator.path().exists());
    }

    #[test]
    fn test_fallback_uses_recent_commits() {
        let temp = TempDir::new().unwrap();
        let config = ChangelogConfig {
            fallback_commit_count: 1,
            ..ChangelogConfig::default()
        };
        let generator = ChangelogGenerator::new(config, temp.path());
        let source = FakeSource::with(&["feat: old feature nobody wants", "fix: handle empty config file"]);

        let preview = generator.generate(&source, true).unwrap().unwrap();
        assert_eq!(preview, "### Fixed\n\n- handle empty config file");
    }

    #[test]
    fn test_unknown_watermark_is_fatal() {
        let temp = TempDir::new().unwrap();
        let generator = generator(&temp);
        let source = FakeSource::with(&["feat: support yaml configuration"]);
        let doc = "# Changelog\n\n<!-- CI-LAST-PROCESSED: 0000dead -->\n";
        fs::write(generator.path(), doc).unwrap();

        let err = generator.generate(&source, false).unwrap_err();
        assert!(matches!(err, ChangelogError::CommitQuery(GitError::UnknownRevision(_))));
        assert_eq!(fs::read_to_string(generator.path()).unwrap(), doc);
    }

    #[test]
    fn test_render_pending_and_last_processed() {
        let temp = TempDir::new().unwrap();
        let generator = generator(&temp);
        let source = FakeSource::with(&["feat: support yaml configuration"]);

        assert_eq!(last_processed(generator.path()).unwrap(), None);
        assert!(generator.render_pending(&source).unwrap().is_some());

        generator.generate(&source, false).unwrap();
        assert_eq!(last_processed(generator.path()).unwrap(), source.head_hash().ok());
        assert!(generator.render_pending(&source).unwrap().is_none());
    }

    struct ConventionalOnly;

    impl CommitParser for ConventionalOnly {
        fn parse(&self, commit: &CommitRecord) -> Option<ChangelogEntry> {
            let parsed = crate::parser::parse_message(&commit.message).filter(|p| p.conventional)?;
            Some(ChangelogEntry {
                commit_type: parsed.commit_type,
                scope: parsed.scope,
                description: parsed.description,
                breaking: parsed.breaking,
                hash: commit.hash.clone(),
            })
        }
    }

    #[test]
    fn test_custom_parser_and_formatter() {
        let temp = TempDir::new().unwrap();
        let generator = generator(&temp)
            .with_parser(ConventionalOnly)
            .with_formatter(MarkdownFormatter::new().with_min_entry_length(3));
        let source = FakeSource::with(&["add button component", "fix: typo"]);

        let preview = generator.generate(&source, true).unwrap();
        assert_eq!(preview.as_deref(), Some("### Fixed\n\n- typo"));
    }

    #[test]
    fn test_output_path_override() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("docs").join("HISTORY.md");
        let generator = generator(&temp).with_path(&target);
        let source = FakeSource::with(&["feat: support yaml configuration"]);

        generator.generate(&source, false).unwrap().unwrap();
        assert!(target.exists());
        assert!(!temp.path().join("CHANGELOG.md").exists());
    }
}

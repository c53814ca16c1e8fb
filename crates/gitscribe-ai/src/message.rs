//! Commit message cleanup and fallback

use std::path::Path;

use gitscribe_changelog::parser::{infer_type, parse_message};
use gitscribe_core::error::AiError;
use gitscribe_git::StagedChanges;
use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, instrument};

use crate::prompt::build_prompt;
use crate::provider::MessageGenerator;
use crate::Result;

/// Chatty lead-ins such as "Here is the commit message:"
static LEAD_IN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(here('s| is)|sure|okay|certainly|suggested|commit message)\b.*:$")
        .expect("Invalid regex")
});

static LABEL_PREFIX_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(commit )?message:\s*").expect("Invalid regex"));

fn strip_quotes(line: &str) -> &str {
    line.trim()
        .trim_matches(|c| matches!(c, '"' | '\'' | '`'))
        .trim()
}

/// Turn raw AI output into a single conventional commit header.
///
/// Code fences and quoting are removed and the first meaningful line is
/// kept. A line that is not already conventional gets an inferred type
/// prefix.
pub fn normalize_message(raw: &str) -> Result<String> {
    let line = raw
        .lines()
        .map(str::trim)
        .filter(|l| !l.starts_with("```"))
        .map(|l| LABEL_PREFIX_REGEX.replace(l, "").into_owned())
        .map(|l| strip_quotes(&l).to_string())
        .find(|l| !l.is_empty() && !LEAD_IN_REGEX.is_match(l))
        .ok_or(AiError::EmptyResponse)?;

    match parse_message(&line) {
        Some(parsed) if parsed.conventional => Ok(line),
        _ => Ok(format!("{}: {}", infer_type(&line), line)),
    }
}

fn is_doc(path: &str) -> bool {
    let lower = path.to_lowercase();
    lower.starts_with("docs/")
        || lower.contains("/docs/")
        || [".md", ".mdx", ".rst", ".adoc"]
            .iter()
            .any(|ext| lower.ends_with(ext))
}

fn is_test(path: &str) -> bool {
    let lower = path.to_lowercase();
    let file_name = Path::new(&lower)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("");
    lower.starts_with("tests/")
        || lower.contains("/tests/")
        || lower.contains("__tests__/")
        || file_name.starts_with("test_")
        || ["_test.", ".test.", ".spec."]
            .iter()
            .any(|marker| file_name.contains(marker))
}

fn is_ci(path: &str) -> bool {
    path.starts_with(".github/workflows/")
        || path.starts_with(".circleci/")
        || path.starts_with(".gitlab-ci")
        || path == ".travis.yml"
        || path == "Jenkinsfile"
}

/// Message built from the staged paths alone, for when the AI is unavailable
pub fn fallback_message(paths: &[&str]) -> String {
    let subject = match paths {
        [] => return "chore: update files".to_string(),
        [single] => Path::new(single)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(*single)
            .to_string(),
        many => format!("{} files", many.len()),
    };

    let commit_type = if paths.iter().all(|p| is_doc(p)) {
        "docs"
    } else if paths.iter().all(|p| is_test(p)) {
        "test"
    } else if paths.iter().any(|p| is_ci(p)) {
        "ci"
    } else {
        "chore"
    };

    format!("{}: update {}", commit_type, subject)
}

/// Ask `generator` for a commit message describing `changes`
#[instrument(skip(generator, changes), fields(ai = generator.name(), file_count = changes.files.len()))]
pub async fn suggest_message<G: MessageGenerator + ?Sized>(
    generator: &G,
    changes: &StagedChanges,
    max_diff_chars: usize,
) -> Result<String> {
    let prompt = build_prompt(changes, max_diff_chars);
    let raw = generator.generate(&prompt).await?;
    let message = normalize_message(&raw)?;
    debug!(message = %message, "Commit message generated");
    Ok(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gitscribe_git::FileChange;

    #[test]
    fn test_conventional_output_is_kept() {
        assert_eq!(
            normalize_message("feat(cli): add status command\n").unwrap(),
            "feat(cli): add status command"
        );
    }

    #[test]
    fn test_fences_quotes_and_lead_ins_are_removed() {
        let raw = "Here is the commit message:\n\n```\n\"fix(git): handle unborn HEAD\"\n```\n";
        assert_eq!(normalize_message(raw).unwrap(), "fix(git): handle unborn HEAD");

        assert_eq!(
            normalize_message("`docs: explain config lookup`").unwrap(),
            "docs: explain config lookup"
        );
        assert_eq!(
            normalize_message("Commit message: chore: bump deps").unwrap(),
            "chore: bump deps"
        );
    }

    #[test]
    fn test_non_conventional_gets_inferred_type() {
        assert_eq!(
            normalize_message("Add dark mode toggle").unwrap(),
            "feat: Add dark mode toggle"
        );
        assert_eq!(
            normalize_message("Fix crash when config is missing").unwrap(),
            "fix: Fix crash when config is missing"
        );
    }

    #[test]
    fn test_empty_output_is_an_error() {
        assert!(matches!(normalize_message(""), Err(AiError::EmptyResponse)));
        assert!(matches!(normalize_message("```\n```\n"), Err(AiError::EmptyResponse)));
    }

    #[test]
    fn test_fallback_message() {
        assert_eq!(fallback_message(&[]), "chore: update files");
        assert_eq!(fallback_message(&["README.md"]), "docs: update README.md");
        assert_eq!(fallback_message(&["docs/guide.md", "CHANGELOG.md"]), "docs: update 2 files");
        assert_eq!(fallback_message(&["tests/cli.rs", "src/parser_test.go"]), "test: update 2 files");
        assert_eq!(
            fallback_message(&[".github/workflows/ci.yml", "src/main.rs"]),
            "ci: update 2 files"
        );
        assert_eq!(fallback_message(&["src/main.rs"]), "chore: update main.rs");
    }

    struct Canned(&'static str);

    #[async_trait::async_trait]
    impl MessageGenerator for Canned {
        fn name(&self) -> &str {
            "canned"
        }

        async fn generate(&self, prompt: &str) -> Result<String> {
            assert!(prompt.contains("src/lib.rs"));
            Ok(self.0.to_string())
        }
    }

    #[tokio::test]
    async fn test_suggest_message() {
        let changes = StagedChanges {
            files: vec![("src/lib.rs".to_string(), FileChange::Modified)],
            diff: "+pub fn hello() {}\n".to_string(),
        };

        let message = suggest_message(&Canned("```\nadd hello helper\n```"), &changes, 100)
            .await
            .unwrap();
        assert_eq!(message, "feat: add hello helper");
    }
}

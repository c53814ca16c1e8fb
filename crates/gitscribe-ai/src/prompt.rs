//! Prompt assembly for commit message generation

use gitscribe_changelog::CommitType;
use gitscribe_git::StagedChanges;

/// Appended after a diff cut short by [`truncate_diff`]
pub const TRUNCATION_MARKER: &str = "... [diff truncated]";

/// Cut `diff` to at most `max_chars` characters, marking the cut
pub fn truncate_diff(diff: &str, max_chars: usize) -> String {
    match diff.char_indices().nth(max_chars) {
        None => diff.to_string(),
        Some((byte_index, _)) => {
            let kept = diff[..byte_index].trim_end_matches(|c| c != '\n');
            let kept = if kept.is_empty() { &diff[..byte_index] } else { kept };
            format!("{}\n{}", kept.trim_end_matches('\n'), TRUNCATION_MARKER)
        }
    }
}

/// Build the prompt sent to the AI command
pub fn build_prompt(changes: &StagedChanges, max_diff_chars: usize) -> String {
    let types = CommitType::ALL
        .iter()
        .map(|t| t.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    let files = changes
        .files
        .iter()
        .map(|(path, change)| format!("- {}: {}", change.as_str(), path))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Write a git commit message for the staged changes below.\n\
         \n\
         Reply with a single line in Conventional Commits format, `type(scope): description`, \
         where type is one of: {types}. Keep it under 72 characters and reply with the message only.\n\
         \n\
         Files changed:\n\
         {files}\n\
         \n\
         Diff:\n\
         ```diff\n\
         {diff}\n\
         ```\n",
        types = types,
        files = files,
        diff = truncate_diff(changes.diff.trim_end(), max_diff_chars),
    )
}

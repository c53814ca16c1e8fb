//! Parsing and merging the body of the Unreleased block

use tracing::debug;

use crate::dedup::dedupe_lines;
use crate::formatter::render_sections;
use crate::types::CommitType;

/// Split a rendered body into `(section title, line)` pairs.
///
/// Returns `None` for a body that does not look like rendered sections: a
/// stray line outside any `### ` heading, text that is neither a heading nor
/// an entry, or no entries at all. Indented lines continue the previous entry.
pub fn parse_body(body: &str) -> Option<Vec<(String, String)>> {
    let mut title: Option<String> = None;
    let mut pairs: Vec<(String, String)> = Vec::new();

    for raw in body.lines() {
        let line = raw.trim_end();
        let trimmed = line.trim_start();

        if trimmed.is_empty() || trimmed.starts_with("<!--") {
            continue;
        }

        if let Some(heading) = trimmed.strip_prefix("### ") {
            title = Some(heading.trim().to_string());
            continue;
        }

        let current = title.as_ref()?;

        if is_entry_line(trimmed) && trimmed.len() == line.len() {
            pairs.push((current.clone(), line.to_string()));
        } else if line.len() != trimmed.len() {
            let (_, last) = pairs.last_mut()?;
            last.push('\n');
            last.push_str(line);
        } else {
            return None;
        }
    }

    (!pairs.is_empty()).then_some(pairs)
}

fn is_entry_line(line: &str) -> bool {
    ["- ", "* ", "+ ", "**"].iter().any(|p| line.starts_with(p))
}

/// Merge existing and new section content into one deduplicated body.
///
/// Existing lines come first so an entry keeps its position across runs;
/// sections are re-ordered by type with unknown titles last.
pub fn merge_bodies(existing: &str, incoming: &str) -> String {
    let Some(old_pairs) = parse_body(existing) else {
        debug!("Existing Unreleased content is unparsable, replacing it");
        return incoming.trim().to_string();
    };
    let Some(new_pairs) = parse_body(incoming) else {
        return incoming.trim().to_string();
    };

    let combined: Vec<(String, String)> = old_pairs.into_iter().chain(new_pairs).collect();
    let total = combined.len();
    let deduped = dedupe_lines(combined);
    debug!(total, kept = deduped.len(), "Merged Unreleased entries");

    let mut groups: Vec<(String, Vec<String>)> = Vec::new();
    for (title, line) in deduped {
        match groups
            .iter_mut()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(&title))
        {
            Some((_, lines)) => lines.push(line),
            None => groups.push((title, vec![line])),
        }
    }
    groups.sort_by_key(|(title, _)| CommitType::section_rank(title));

    render_sections(&groups)
}

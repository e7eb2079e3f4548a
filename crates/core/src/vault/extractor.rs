//! Note content extraction: title, tags, typed fields, raw frontmatter.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::sync::LazyLock;
use std::time::UNIX_EPOCH;

use regex::Regex;
use serde_yaml::Value;

use super::fields::NoteField;
use super::types::NoteRecord;
use super::walker::WalkedFile;
use crate::frontmatter::{self, Frontmatter, ParsedDocument};

// Inline tag: `#word/with-slashes_and-dashes` at line start or after whitespace
static INLINE_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|\s)#([A-Za-z0-9/_-]+)").unwrap());

static H1_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^#[ \t]+(.+?)[ \t]*\r?$").unwrap());

static TAG_SPLIT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[,\s]+").unwrap());

/// Extract a note record from file content.
///
/// Never fails: malformed frontmatter is treated as absent and the whole file
/// becomes the body.
pub fn extract_note(content: &str, file: &WalkedFile) -> NoteRecord {
    let parsed = frontmatter::parse(content).unwrap_or_else(|e| {
        tracing::debug!("Ignoring frontmatter in {}: {}", file.relative_path.display(), e);
        ParsedDocument { frontmatter: None, body: content.to_string() }
    });
    let fm = parsed.frontmatter.unwrap_or_default();

    let title = extract_title(&fm, &parsed.body, &file.absolute_path);

    let mut tags = frontmatter_tags(fm.get("tags"));
    tags.extend(inline_tags(&parsed.body));

    let modified_ms = file
        .modified
        .duration_since(UNIX_EPOCH)
        .map(|d| i64::try_from(d.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or_default();

    NoteRecord {
        path: file.absolute_path.clone(),
        relative_path: file.relative_path.clone(),
        title,
        tags,
        modified_ms,
        frontmatter: frontmatter_json(&fm),
        status: NoteField::Status.read_str(&fm).map(|s| s.to_lowercase()),
        project: NoteField::Project.read_str(&fm).map(|s| strip_wikilink(&s)),
        date_due: NoteField::DateDue.read_str(&fm),
        date_started: NoteField::DateStarted.read_str(&fm),
        date_scheduled: NoteField::DateScheduled.read_str(&fm),
        recurrence: NoteField::Recurrence.read_str(&fm),
        recurrence_anchor: NoteField::RecurrenceAnchor.read_str(&fm),
        priority: NoteField::Priority.read_str(&fm),
        time_tracked: NoteField::TimeTracked.read_number(&fm),
        time_estimate: NoteField::TimeEstimate.read_number(&fm),
    }
}

fn extract_title(fm: &Frontmatter, body: &str, file_path: &Path) -> String {
    if let Some(title) = fm.get_str("title").map(str::trim)
        && !title.is_empty()
    {
        return title.to_string();
    }

    if let Some(heading) = H1_RE.captures(body).and_then(|c| c.get(1))
        && !heading.as_str().trim().is_empty()
    {
        return heading.as_str().trim().to_string();
    }

    file_path.file_stem().and_then(|s| s.to_str()).unwrap_or("Untitled").to_string()
}

/// Tags from the `tags` frontmatter field: a string or a list of strings,
/// each split further on commas and whitespace.
fn frontmatter_tags(value: Option<&Value>) -> BTreeSet<String> {
    let raw: Vec<&str> = match value {
        Some(Value::String(s)) => vec![s.as_str()],
        Some(Value::Sequence(seq)) => seq.iter().filter_map(Value::as_str).collect(),
        _ => Vec::new(),
    };

    raw.into_iter()
        .flat_map(|s| TAG_SPLIT_RE.split(s))
        .map(|t| t.trim().trim_start_matches('#'))
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}

fn inline_tags(body: &str) -> BTreeSet<String> {
    INLINE_TAG_RE
        .captures_iter(body)
        .filter_map(|cap| cap.get(1))
        .map(|m| m.as_str().to_lowercase())
        .collect()
}

/// `[[Target|Alias]]` → `Target`; plain values are only trimmed.
fn strip_wikilink(value: &str) -> String {
    let trimmed = value.trim();
    match trimmed.strip_prefix("[[").and_then(|s| s.strip_suffix("]]")) {
        Some(inner) => inner.split('|').next().unwrap_or(inner).trim().to_string(),
        None => trimmed.to_string(),
    }
}

fn frontmatter_json(fm: &Frontmatter) -> BTreeMap<String, serde_json::Value> {
    fm.iter()
        .filter_map(|(key, value)| {
            serde_json::to_value(value).ok().map(|json| (key.to_string(), json))
        })
        .collect()
}

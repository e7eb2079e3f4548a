//! Creating new todo and project notes.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde_yaml::{Mapping, Value};

use super::MutateError;
use super::fields::{MODIFIED_KEY, timestamp};
use crate::frontmatter::{Frontmatter, ParsedDocument, serialize};

/// Kind of note to create; decides the initial status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewNoteKind {
    Todo,
    Project,
}

impl NewNoteKind {
    pub fn initial_status(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::Project => "planning",
        }
    }
}

/// Title with path separators and characters that are invalid in file
/// names replaced by `-`.
pub fn sanitize_title(title: &str) -> String {
    title
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '-',
            c if c.is_control() => ' ',
            c => c,
        })
        .collect::<String>()
        .trim_matches(|c: char| c == '.' || c.is_whitespace())
        .to_string()
}

/// Write `<dir>/<title>.md`. Never overwrites an existing file.
pub fn create_note(
    dir: &Path,
    title: &str,
    kind: NewNoteKind,
    tag: Option<&str>,
) -> Result<PathBuf, MutateError> {
    create_note_at(dir, title, kind, tag, Utc::now())
}

fn create_note_at(
    dir: &Path,
    title: &str,
    kind: NewNoteKind,
    tag: Option<&str>,
    now: DateTime<Utc>,
) -> Result<PathBuf, MutateError> {
    let file_stem = sanitize_title(title);
    if file_stem.is_empty() {
        return Err(MutateError::InvalidTitle(title.to_string()));
    }
    let title = title.trim();
    let path = dir.join(format!("{file_stem}.md"));

    let mut fields = Mapping::new();
    fields.insert("title".into(), title.into());
    if let Some(tag) = tag.map(|t| t.trim().trim_start_matches('#')).filter(|t| !t.is_empty()) {
        fields.insert("tags".into(), Value::Sequence(vec![tag.into()]));
    }
    fields.insert("status".into(), kind.initial_status().into());
    fields.insert("dateCreated".into(), timestamp(now).into());
    fields.insert(MODIFIED_KEY.into(), timestamp(now).into());

    let doc = ParsedDocument {
        frontmatter: Some(Frontmatter { fields }),
        body: format!("# {title}\n"),
    };
    let content = serialize(&doc)
        .map_err(|e| MutateError::Serialize { path: path.clone(), source: e })?;

    std::fs::create_dir_all(dir)
        .map_err(|e| MutateError::Write { path: path.clone(), source: e })?;
    let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
            return Err(MutateError::AlreadyExists(path));
        }
        Err(e) => return Err(MutateError::Write { path, source: e }),
    };
    file.write_all(content.as_bytes())
        .map_err(|e| MutateError::Write { path: path.clone(), source: e })?;

    tracing::info!("Created {:?} note {}", kind, path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vault::{VaultScanner, sort_by_modified_desc};
    use chrono::TimeZone;
    use tempfile::TempDir;

    #[test]
    fn test_sanitize_title() {
        assert_eq!(sanitize_title("  Fix: sink/drain?  "), "Fix- sink-drain-");
        assert_eq!(sanitize_title("..."), "");
        assert_eq!(sanitize_title("Plain"), "Plain");
    }

    #[test]
    fn test_create_todo() {
        let dir = TempDir::new().unwrap();
        let now = Utc.with_ymd_and_hms(2025, 10, 26, 8, 0, 0).unwrap();
        let path =
            create_note_at(dir.path(), "Buy milk", NewNoteKind::Todo, Some("#proj/todo"), now)
                .unwrap();

        assert_eq!(path, dir.path().join("Buy milk.md"));
        insta::assert_snapshot!(std::fs::read_to_string(&path).unwrap(), @r"
        ---
        title: Buy milk
        tags:
        - proj/todo
        status: todo
        dateCreated: 2025-10-26T08:00:00.000Z
        dateModified: 2025-10-26T08:00:00.000Z
        ---
        # Buy milk
        ");
    }

    #[test]
    fn test_created_notes_are_scannable() {
        let dir = TempDir::new().unwrap();
        create_note(dir.path(), "Garden", NewNoteKind::Project, Some("proj/project")).unwrap();
        create_note(&dir.path().join("Tasks"), "Weed", NewNoteKind::Todo, None).unwrap();

        let mut notes = VaultScanner::new(dir.path()).scan().unwrap();
        sort_by_modified_desc(&mut notes);
        let garden = notes.iter().find(|n| n.title == "Garden").unwrap();
        assert_eq!(garden.status.as_deref(), Some("planning"));
        assert!(garden.has_tag("proj/project"));
        let weed = notes.iter().find(|n| n.title == "Weed").unwrap();
        assert_eq!(weed.status.as_deref(), Some("todo"));
        assert!(weed.tags.is_empty());
    }

    #[test]
    fn test_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("Taken.md"), "keep me").unwrap();

        let err = create_note(dir.path(), "Taken", NewNoteKind::Todo, None).unwrap_err();
        assert!(matches!(err, MutateError::AlreadyExists(_)));
        assert_eq!(std::fs::read_to_string(dir.path().join("Taken.md")).unwrap(), "keep me");
    }

    #[test]
    fn test_blank_title_is_rejected() {
        let dir = TempDir::new().unwrap();
        let err = create_note(dir.path(), " .. ", NewNoteKind::Todo, None).unwrap_err();
        assert!(matches!(err, MutateError::InvalidTitle(_)));
    }
}

//! Status, project and date rewrites.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde_yaml::Value;

use super::{MutateError, write_atomic};
use crate::frontmatter::{self, FieldEdit, Frontmatter, apply_edits, serialize};
use crate::vault::NoteField;

/// Frontmatter key stamped on every rewrite.
pub const MODIFIED_KEY: &str = "dateModified";

/// Date fields that can be set from the front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateField {
    Due,
    Started,
    Scheduled,
}

impl DateField {
    pub fn field(self) -> NoteField {
        match self {
            Self::Due => NoteField::DateDue,
            Self::Started => NoteField::DateStarted,
            Self::Scheduled => NoteField::DateScheduled,
        }
    }
}

impl FromStr for DateField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "due" => Ok(Self::Due),
            "started" | "start" => Ok(Self::Started),
            "scheduled" => Ok(Self::Scheduled),
            other => Err(format!("unknown date field: {other}")),
        }
    }
}

/// Set the status. An empty status removes it.
pub fn set_status(path: &Path, status: &str) -> Result<(), MutateError> {
    let status = status.trim();
    let value = (!status.is_empty()).then(|| Value::String(status.to_string()));
    rewrite_at(path, Utc::now(), |fm| field_edits(fm, NoteField::Status, value))
}

/// Set the project as a `[[wiki link]]`, or clear it with `None` / `""`.
pub fn set_project_field(path: &Path, project: Option<&str>) -> Result<(), MutateError> {
    let value = project.map(str::trim).filter(|p| !p.is_empty()).map(|p| {
        if p.starts_with("[[") && p.ends_with("]]") {
            Value::String(p.to_string())
        } else {
            Value::String(format!("[[{p}]]"))
        }
    });
    rewrite_at(path, Utc::now(), |fm| field_edits(fm, NoteField::Project, value))
}

/// Set a date field as `YYYY-MM-DD`, or clear it with `None`.
pub fn set_date_field(
    path: &Path,
    field: DateField,
    date: Option<NaiveDate>,
) -> Result<(), MutateError> {
    let value = date.map(|d| Value::String(d.format("%Y-%m-%d").to_string()));
    rewrite_at(path, Utc::now(), |fm| field_edits(fm, field.field(), value))
}

/// Every spelling of `field` already present is rewritten; with none present
/// the canonical key is added. `None` removes every spelling.
fn field_edits(fm: &Frontmatter, field: NoteField, value: Option<Value>) -> Vec<FieldEdit> {
    let present = field.present_keys(fm);
    match value {
        None => present.into_iter().map(FieldEdit::remove).collect(),
        Some(value) if present.is_empty() => vec![FieldEdit::set(field.canonical(), value)],
        Some(value) => present.into_iter().map(|key| FieldEdit::set(key, value.clone())).collect(),
    }
}

pub(crate) fn timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn rewrite_at<F>(path: &Path, now: DateTime<Utc>, edits: F) -> Result<(), MutateError>
where
    F: FnOnce(&Frontmatter) -> Vec<FieldEdit>,
{
    let content = fs::read_to_string(path)
        .map_err(|e| MutateError::Io { path: path.to_path_buf(), source: e })?;
    let doc = frontmatter::parse(&content)
        .map_err(|e| MutateError::Parse { path: path.to_path_buf(), source: e })?;

    let mut edits = match &doc.frontmatter {
        Some(fm) => edits(fm),
        None => edits(&Frontmatter::default()),
    };
    edits.push(FieldEdit::set(MODIFIED_KEY, timestamp(now)));

    let doc = apply_edits(doc, &edits);
    let output = serialize(&doc)
        .map_err(|e| MutateError::Serialize { path: path.to_path_buf(), source: e })?;
    write_atomic(path, &output)?;

    tracing::debug!("Rewrote frontmatter of {}", path.display());
    Ok(())
}

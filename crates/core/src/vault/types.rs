//! Note record types produced by the scanner.

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Structured view of a single note file.
///
/// Records are snapshots: mutation operations rewrite the file on disk and a
/// new record comes from the next scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteRecord {
    /// Absolute path to the file.
    pub path: PathBuf,
    /// Path relative to the vault root.
    pub relative_path: PathBuf,
    /// Title from frontmatter, first H1, or file stem.
    pub title: String,
    /// Frontmatter and inline tags, lowercased.
    pub tags: BTreeSet<String>,
    /// File modification time in milliseconds since the Unix epoch.
    pub modified_ms: i64,
    /// Raw frontmatter fields.
    #[serde(default)]
    pub frontmatter: BTreeMap<String, serde_json::Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_due: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_started: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_scheduled: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence_anchor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_tracked: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_estimate: Option<f64>,
}

impl NoteRecord {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(&tag.to_lowercase())
    }

    /// File name without extension.
    pub fn basename(&self) -> &str {
        self.path.file_stem().and_then(|s| s.to_str()).unwrap_or_default()
    }
}

/// Newest first.
pub fn sort_by_modified_desc(notes: &mut [NoteRecord]) {
    notes.sort_by(|a, b| b.modified_ms.cmp(&a.modified_ms));
}

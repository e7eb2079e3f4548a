//! Targeted rewrites of a single note's frontmatter, and note creation.
//!
//! Every rewrite stamps `dateModified`, leaves the body and untouched fields
//! as they were, and replaces the file atomically.

mod create;
mod fields;

pub use create::{NewNoteKind, create_note, sanitize_title};
pub use fields::{DateField, MODIFIED_KEY, set_date_field, set_project_field, set_status};

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::frontmatter::FrontmatterParseError;

#[derive(Debug, Error)]
pub enum MutateError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse frontmatter in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: FrontmatterParseError,
    },

    #[error("failed to serialize frontmatter for {path}: {source}")]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("note already exists: {0}")]
    AlreadyExists(PathBuf),

    #[error("invalid note title: {0:?}")]
    InvalidTitle(String),
}

/// Write `content` to a temporary file beside `path`, then rename it over
/// `path`.
///
/// A symlinked note is written through to its target, and the target keeps
/// its permissions.
fn write_atomic(path: &Path, content: &str) -> Result<(), MutateError> {
    let write_err = |source| MutateError::Write { path: path.to_path_buf(), source };

    let target = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    let permissions = fs::metadata(&target).map(|m| m.permissions()).ok();

    let dir = match target.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(content.as_bytes()).map_err(write_err)?;
    if let Some(permissions) = permissions {
        tmp.as_file().set_permissions(permissions).map_err(write_err)?;
    }
    tmp.as_file().sync_all().map_err(write_err)?;
    tmp.persist(&target).map_err(|e| write_err(e.error))?;
    Ok(())
}

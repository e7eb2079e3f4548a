//! Base configuration types.

use std::path::{Path, PathBuf};

use crate::filter::{FilterSet, Operator};

/// Directory whose presence marks a vault root.
pub const DEFAULT_VAULT_MARKER: &str = ".obsidian";

/// Vault root located for a base file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VaultRoot {
    /// An ancestor directory containing the vault marker.
    Marker(PathBuf),
    /// No marker found; the base file's grandparent directory is assumed.
    Fallback(PathBuf),
}

impl VaultRoot {
    pub fn path(&self) -> &Path {
        match self {
            Self::Marker(path) | Self::Fallback(path) => path,
        }
    }

    /// True when the root was confirmed by the marker directory.
    pub fn is_confirmed(&self) -> bool {
        matches!(self, Self::Marker(_))
    }
}

/// A named extra filter layered on top of the base filters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewDefinition {
    pub name: String,
    /// Display hint, `"table"` unless the view says otherwise.
    pub kind: String,
    pub filter_set: FilterSet,
}

/// Parsed base file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseConfig {
    pub filter_set: FilterSet,
    pub vault_root: Option<VaultRoot>,
    pub views: Vec<ViewDefinition>,
    /// File this configuration was read from.
    pub source: PathBuf,
}

impl BaseConfig {
    /// View by exact (case-sensitive) name.
    pub fn view(&self, name: &str) -> Option<&ViewDefinition> {
        self.views.iter().find(|v| v.name == name)
    }

    /// Tags the base filters select on: values of non-negated `tags` and
    /// `file.tags` terms, lowercased, first occurrence kept.
    pub fn tag_values(&self) -> Vec<String> {
        let mut tags: Vec<String> = Vec::new();
        let terms = self
            .filter_set
            .terms
            .iter()
            .filter(|t| matches!(t.property.as_str(), "tags" | "file.tags"))
            .filter(|t| !t.operator.is_negated() && !matches!(t.operator, Operator::Unknown(_)));
        for term in terms {
            for value in &term.values {
                let tag = value.trim_start_matches('#').to_lowercase();
                if !tags.contains(&tag) {
                    tags.push(tag);
                }
            }
        }
        tags
    }
}

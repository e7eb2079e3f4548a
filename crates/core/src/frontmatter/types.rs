//! Frontmatter types and data structures.

use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};

/// Represents parsed YAML frontmatter from a markdown document.
///
/// Fields keep their insertion order so a rewrite leaves untouched keys where
/// the user put them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Frontmatter {
    pub fields: Mapping,
}

impl Frontmatter {
    /// Look up a field by its exact key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Look up a field and return it only if it is a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Iterate over fields whose keys are strings.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().filter_map(|(k, v)| k.as_str().map(|k| (k, v)))
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Result of splitting frontmatter from markdown.
#[derive(Debug, Clone)]
pub struct ParsedDocument {
    /// Parsed frontmatter (if present).
    pub frontmatter: Option<Frontmatter>,
    /// The markdown body (everything after frontmatter).
    pub body: String,
}

/// A single frontmatter edit.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldEdit {
    /// Set field to value (creates if missing, keeps position if present).
    Set(String, Value),
    /// Remove the field if present.
    Remove(String),
}

impl FieldEdit {
    pub fn set(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Set(key.into(), value.into())
    }

    pub fn remove(key: impl Into<String>) -> Self {
        Self::Remove(key.into())
    }
}

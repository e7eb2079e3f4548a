//! Loading base files and locating their vault root.

use std::fs;
use std::path::{Path, PathBuf};

use serde_yaml::{Mapping, Value};
use thiserror::Error;

use super::types::{BaseConfig, VaultRoot, ViewDefinition};
use crate::filter::{Combine, FilterSet, parse_filter_set};

#[derive(Debug, Error)]
pub enum BaseConfigError {
    #[error("failed to read base file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse base file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("base file {0} is not a YAML mapping")]
    NotAMapping(PathBuf),
}

impl BaseConfig {
    /// Read and parse a base file, then look for its vault root.
    pub fn load(path: &Path, marker: &str) -> Result<Self, BaseConfigError> {
        let content = fs::read_to_string(path)
            .map_err(|e| BaseConfigError::Read { path: path.to_path_buf(), source: e })?;
        let mut config = Self::from_yaml(&content, path)?;
        config.vault_root = discover_vault_root(path, marker);
        Ok(config)
    }

    /// Parse base file content without touching the filesystem.
    pub fn from_yaml(content: &str, source: &Path) -> Result<Self, BaseConfigError> {
        let doc: Value = serde_yaml::from_str(content)
            .map_err(|e| BaseConfigError::Parse { path: source.to_path_buf(), source: e })?;

        let doc = match doc {
            Value::Mapping(map) => map,
            // An empty file is an empty configuration
            Value::Null => Mapping::new(),
            _ => return Err(BaseConfigError::NotAMapping(source.to_path_buf())),
        };

        let filter_set = read_filters(doc.get("filters"), Combine::And);
        let views = match doc.get("views") {
            Some(Value::Sequence(views)) => views.iter().filter_map(read_view).collect(),
            _ => Vec::new(),
        };

        Ok(Self { filter_set, vault_root: None, views, source: source.to_path_buf() })
    }
}

/// Load a base file, logging and discarding any error.
pub fn load_config(path: &Path, marker: &str) -> Option<BaseConfig> {
    match BaseConfig::load(path, marker) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::warn!("{}", e);
            None
        }
    }
}

/// Walk up from the base file's directory to the first ancestor containing
/// `marker`. Without one, fall back to the file's grandparent.
pub fn discover_vault_root(config_path: &Path, marker: &str) -> Option<VaultRoot> {
    let config_path =
        std::path::absolute(config_path).unwrap_or_else(|_| config_path.to_path_buf());

    let found = config_path
        .ancestors()
        .skip(1)
        .find(|dir| dir.join(marker).is_dir());
    if let Some(dir) = found {
        return Some(VaultRoot::Marker(dir.to_path_buf()));
    }

    let fallback = config_path.parent()?.parent()?;
    tracing::warn!(
        "No {} directory above {}; assuming vault root {}",
        marker,
        config_path.display(),
        fallback.display()
    );
    Some(VaultRoot::Fallback(fallback.to_path_buf()))
}

/// `or` list, else `and` list, else nothing. A bare list or string uses
/// `default`.
fn read_filters(value: Option<&Value>, default: Combine) -> FilterSet {
    match value {
        Some(Value::Mapping(map)) => {
            if let Some(Value::Sequence(items)) = map.get("or") {
                parse_filter_set(strings(items), Combine::Or)
            } else if let Some(Value::Sequence(items)) = map.get("and") {
                parse_filter_set(strings(items), Combine::And)
            } else {
                FilterSet::new(Vec::new(), default)
            }
        }
        Some(Value::Sequence(items)) => parse_filter_set(strings(items), default),
        Some(Value::String(item)) => parse_filter_set([item.as_str()], Combine::And),
        _ => FilterSet::new(Vec::new(), default),
    }
}

fn strings(items: &[Value]) -> impl Iterator<Item = &str> {
    items.iter().filter_map(Value::as_str)
}

fn read_view(value: &Value) -> Option<ViewDefinition> {
    let map = value.as_mapping()?;
    let Some(name) = map.get("name").and_then(Value::as_str) else {
        tracing::debug!("Skipping base view without a name");
        return None;
    };
    let kind = map.get("type").and_then(Value::as_str).unwrap_or("table");

    Some(ViewDefinition {
        name: name.to_string(),
        kind: kind.to_string(),
        filter_set: read_filters(map.get("filters"), Combine::Or),
    })
}

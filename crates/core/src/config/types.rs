use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ConfigFile {
    pub version: u32,
    pub profile: Option<String>,
    pub profiles: HashMap<String, Profile>,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub scan: ScanConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize)]
pub struct Profile {
    /// Base file selecting todo notes.
    pub todo_base: String,
    /// Base file selecting project notes.
    pub project_base: String,
    #[serde(default)]
    pub todo_view: Option<String>,
    #[serde(default)]
    pub project_view: Option<String>,
    /// Where `new` writes notes, relative to the vault root unless absolute.
    #[serde(default)]
    pub new_note_dir: Option<String>,
    /// Folders to skip while scanning (relative to the vault root).
    #[serde(default)]
    pub excluded_folders: Vec<String>,
    #[serde(default = "default_max_results")]
    pub max_results: usize,
    #[serde(default = "default_vault_marker")]
    pub vault_marker: String,
}

fn default_max_results() -> usize {
    500
}

fn default_vault_marker() -> String {
    crate::bases::DEFAULT_VAULT_MARKER.to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct CacheConfig {
    #[serde(default = "default_cache_enabled")]
    pub enabled: bool,
    #[serde(default = "default_max_age_secs")]
    pub max_age_secs: u64,
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { enabled: default_cache_enabled(), max_age_secs: default_max_age_secs(), path: None }
    }
}

fn default_cache_enabled() -> bool {
    true
}

fn default_max_age_secs() -> u64 {
    300
}

#[derive(Debug, Deserialize, Clone)]
pub struct ScanConfig {
    #[serde(default = "default_max_files")]
    pub max_files: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self { max_files: default_max_files() }
    }
}

fn default_max_files() -> usize {
    crate::vault::DEFAULT_MAX_FILES
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub file_level: Option<String>,
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level(), file_level: None, file: None }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Cache settings with defaults applied and the path expanded.
#[derive(Debug, Clone)]
pub struct ResolvedCache {
    pub enabled: bool,
    pub max_age: Duration,
    pub path: PathBuf,
}

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub active_profile: String,
    pub todo_base: PathBuf,
    pub project_base: PathBuf,
    pub todo_view: Option<String>,
    pub project_view: Option<String>,
    pub new_note_dir: Option<PathBuf>,
    pub excluded_folders: Vec<PathBuf>,
    pub max_results: usize,
    pub vault_marker: String,
    pub max_files: usize,
    pub cache: ResolvedCache,
    pub logging: LoggingConfig,
}

impl ResolvedConfig {
    /// Directory new notes go to inside `vault_root`.
    pub fn new_note_dir_in(&self, vault_root: &Path) -> PathBuf {
        match &self.new_note_dir {
            Some(dir) if dir.is_absolute() => dir.clone(),
            Some(dir) => vault_root.join(dir),
            None => vault_root.to_path_buf(),
        }
    }
}

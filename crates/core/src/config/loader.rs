use crate::config::types::{
    CacheConfig, ConfigFile, LoggingConfig, Profile, ResolvedCache, ResolvedConfig,
};
use shellexpand::full;
use std::path::{Path, PathBuf};
use std::time::Duration;
use std::{env, fs};

use dirs::home_dir;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found at {0}")]
    NotFound(String),

    #[error("failed to read config file {0}: {1}")]
    ReadError(String, #[source] std::io::Error),

    #[error("failed to parse TOML in {0}: {1}")]
    ParseError(String, #[source] toml::de::Error),

    #[error("profile '{0}' not found")]
    ProfileNotFound(String),

    #[error("no profiles defined in config")]
    NoProfiles,

    #[error("version {0} is unsupported (expected 1)")]
    BadVersion(u32),

    #[error("home directory not available to expand '~'")]
    NoHome,
}

pub struct ConfigLoader;

impl ConfigLoader {
    pub fn load(
        config_path: Option<&Path>,
        profile_override: Option<&str>,
    ) -> Result<ResolvedConfig, ConfigError> {
        let path = match config_path {
            Some(p) => p.to_path_buf(),
            None => default_config_path(),
        };

        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }

        let s = fs::read_to_string(&path)
            .map_err(|e| ConfigError::ReadError(path.display().to_string(), e))?;

        let cf: ConfigFile = toml::from_str(&s)
            .map_err(|e| ConfigError::ParseError(path.display().to_string(), e))?;

        if cf.version != 1 {
            return Err(ConfigError::BadVersion(cf.version));
        }
        if cf.profiles.is_empty() {
            return Err(ConfigError::NoProfiles);
        }

        let active = profile_override
            .map(ToOwned::to_owned)
            .or(cf.profile.clone())
            .unwrap_or_else(|| "default".to_string());

        let prof = cf
            .profiles
            .get(&active)
            .ok_or_else(|| ConfigError::ProfileNotFound(active.clone()))?;

        let resolved = Self::resolve_profile(&active, prof, &cf)?;
        Ok(resolved)
    }

    fn resolve_profile(
        active: &str,
        prof: &Profile,
        cf: &ConfigFile,
    ) -> Result<ResolvedConfig, ConfigError> {
        let non_empty = |s: &Option<String>| {
            s.as_deref().map(str::trim).filter(|s| !s.is_empty()).map(str::to_string)
        };

        let new_note_dir = match non_empty(&prof.new_note_dir) {
            Some(dir) => Some(expand_path(&dir)?),
            None => None,
        };
        let excluded_folders = prof
            .excluded_folders
            .iter()
            .map(|f| expand_path(f))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ResolvedConfig {
            active_profile: active.to_string(),
            todo_base: expand_path(prof.todo_base.trim())?,
            project_base: expand_path(prof.project_base.trim())?,
            todo_view: non_empty(&prof.todo_view),
            project_view: non_empty(&prof.project_view),
            new_note_dir,
            excluded_folders,
            max_results: prof.max_results,
            vault_marker: prof.vault_marker.clone(),
            max_files: cf.scan.max_files,
            cache: resolve_cache(&cf.cache)?,
            logging: resolve_logging(&cf.logging)?,
        })
    }
}

fn resolve_cache(cache: &CacheConfig) -> Result<ResolvedCache, ConfigError> {
    let path = match &cache.path {
        Some(path) => expand_path(&path.to_string_lossy())?,
        None => default_cache_path(),
    };
    Ok(ResolvedCache {
        enabled: cache.enabled,
        max_age: Duration::from_secs(cache.max_age_secs),
        path,
    })
}

fn resolve_logging(log_cfg: &LoggingConfig) -> Result<LoggingConfig, ConfigError> {
    // Resolve log file path if present
    if let Some(ref file) = log_cfg.file {
        let expanded_file = expand_path(&file.to_string_lossy())?;
        return Ok(LoggingConfig {
            level: log_cfg.level.clone(),
            file_level: log_cfg.file_level.clone(),
            file: Some(expanded_file),
        });
    }
    Ok(log_cfg.clone())
}

pub fn default_config_path() -> PathBuf {
    if let Ok(xdg) = env::var("XDG_CONFIG_HOME") {
        return Path::new(&xdg).join("vaultdash").join("config.toml");
    }
    let home = home_dir().unwrap_or_else(|| PathBuf::from("~"));
    home.join(".config").join("vaultdash").join("config.toml")
}

/// Default scan cache database: `<cache dir>/vaultdash/cache.db`.
pub fn default_cache_path() -> PathBuf {
    let base = dirs::cache_dir().unwrap_or_else(|| {
        home_dir().unwrap_or_else(|| PathBuf::from("~")).join(".cache")
    });
    base.join("vaultdash").join("cache.db")
}

fn expand_path(input: &str) -> Result<PathBuf, ConfigError> {
    let expanded = full(input).map_err(|_| ConfigError::NoHome)?;
    Ok(PathBuf::from(expanded.to_string()))
}


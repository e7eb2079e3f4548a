pub mod cache;
pub mod check;
pub mod doctor;
pub mod list;
pub mod mutate;
pub mod new;
pub mod output;

use std::path::{Path, PathBuf};

use tracing::{error, warn};
use vaultdash_core::bases::BaseConfig;
use vaultdash_core::cache::VaultCache;
use vaultdash_core::config::{ConfigLoader, ResolvedConfig};

/// Load the config and start logging, or exit with status 1.
pub fn load_config(config: Option<&Path>, profile: Option<&str>) -> ResolvedConfig {
    let rc = match ConfigLoader::load(config, profile) {
        Ok(rc) => rc,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            std::process::exit(1);
        }
    };
    crate::logging::init(&rc);
    rc
}

/// The scan cache, when enabled. A cache that fails to open is skipped.
pub fn open_cache(rc: &ResolvedConfig) -> Option<VaultCache> {
    if !rc.cache.enabled {
        return None;
    }
    match VaultCache::open(&rc.cache.path) {
        Ok(cache) => Some(cache),
        Err(e) => {
            warn!("Scan cache unavailable at {}: {}", rc.cache.path.display(), e);
            None
        }
    }
}

/// Canonical root of the vault the todo base belongs to.
pub fn vault_root(rc: &ResolvedConfig) -> Option<PathBuf> {
    let base = match BaseConfig::load(&rc.todo_base, &rc.vault_marker) {
        Ok(base) => base,
        Err(e) => {
            warn!("{}", e);
            return None;
        }
    };
    let root = base.vault_root?;
    root.path().canonicalize().ok()
}

/// Drop the cached scan of the configured vault so the next list sees a
/// mutation.
pub fn invalidate_vault(rc: &ResolvedConfig) {
    let Some(cache) = open_cache(rc) else {
        return;
    };
    let Some(root) = vault_root(rc) else {
        return;
    };
    if let Err(e) = cache.invalidate(&root) {
        error!("Failed to invalidate scan cache for {}: {}", root.display(), e);
    }
}

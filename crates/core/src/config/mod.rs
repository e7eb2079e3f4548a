//! Application settings file (`config.toml`) with named profiles.

pub mod loader;
pub mod types;

pub use loader::{ConfigError, ConfigLoader, default_cache_path, default_config_path};
pub use types::{ResolvedCache, ResolvedConfig};

//! Persistent cache of unfiltered vault scans.
//!
//! One SQLite row per vault holds the serialized notes and the time they were
//! written, so a scan within the freshness window can skip the filesystem.
//!
//! # Example
//!
//! ```no_run
//! use vaultdash_core::cache::{VaultCache, DEFAULT_MAX_AGE};
//! use std::path::Path;
//!
//! let cache = VaultCache::open(Path::new("/tmp/vaultdash/cache.db")).unwrap();
//! let vault = Path::new("/home/me/Vault");
//! if cache.is_fresh(vault, DEFAULT_MAX_AGE) {
//!     let notes = cache.get(vault).unwrap_or_default();
//!     println!("{} cached notes", notes.len());
//! }
//! ```

pub mod db;
pub mod schema;

pub use db::{CACHE_NAMESPACE, CACHE_VERSION, CacheError, DEFAULT_MAX_AGE, VaultCache, cache_key};
pub use schema::{SCHEMA_VERSION, SchemaError};

//! Base files: declarative filters and views over a vault.
//!
//! A base file is a YAML document such as:
//!
//! ```yaml
//! filters:
//!   or:
//!     - tags.containsAny("proj/todo", "home/todo")
//! views:
//!   - type: table
//!     name: Open
//!     filters:
//!       and:
//!         - '!status == "done"'
//! ```

pub mod loader;
pub mod types;

pub use loader::{BaseConfigError, discover_vault_root, load_config};
pub use types::{BaseConfig, DEFAULT_VAULT_MARKER, VaultRoot, ViewDefinition};

pub mod bases;
pub mod cache;
pub mod config;
pub mod dashboard;
pub mod filter;
pub mod frontmatter;
pub mod mutate;
pub mod vault;

pub use bases::{BaseConfig, VaultRoot, load_config};
pub use filter::evaluate;
pub use vault::{Decision, NoteRecord, VaultScanner};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

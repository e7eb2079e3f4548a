//! Vault file discovery and note extraction.
//!
//! This module provides utilities for walking vault directories, extracting
//! structured note records from markdown files, and scanning whole vaults
//! through the scan cache.

pub mod extractor;
pub mod fields;
pub mod scanner;
pub mod types;
pub mod walker;

pub use extractor::extract_note;
pub use fields::NoteField;
pub use scanner::{DEFAULT_MAX_FILES, Decision, ScanError, VaultScanner};
pub use types::{NoteRecord, sort_by_modified_desc};
pub use walker::{VaultWalker, VaultWalkerError, WalkedFile};

//! Frontmatter parsing, modification, and serialization.
//!
//! This module provides functionality to:
//! - Parse YAML frontmatter from markdown documents
//! - Set or remove frontmatter fields
//! - Serialize documents back to markdown with frontmatter

pub mod modifier;
pub mod parser;
pub mod serializer;
pub mod types;

pub use modifier::apply_edits;
pub use parser::{FrontmatterParseError, parse};
pub use serializer::{frontmatter_to_yaml, serialize};
pub use types::{FieldEdit, Frontmatter, ParsedDocument};

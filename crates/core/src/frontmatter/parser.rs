//! Frontmatter parsing from markdown documents.

use super::types::{Frontmatter, ParsedDocument};
use serde_yaml::Value;
use thiserror::Error;

/// Errors that can occur during frontmatter parsing.
#[derive(Debug, Error)]
pub enum FrontmatterParseError {
    #[error("invalid YAML frontmatter: {0}")]
    InvalidYaml(#[from] serde_yaml::Error),

    #[error("frontmatter is not a key/value mapping")]
    NotAMapping,
}

/// Parse frontmatter from markdown content.
///
/// Frontmatter is delimited by `---` at the start of the document:
/// ```markdown
/// ---
/// key: value
/// ---
/// # Document content
/// ```
///
/// The body is returned exactly as it appears after the newline that ends the
/// closing delimiter.
pub fn parse(content: &str) -> Result<ParsedDocument, FrontmatterParseError> {
    let trimmed = content.trim_start();

    if !trimmed.starts_with("---") {
        return Ok(ParsedDocument { frontmatter: None, body: content.to_string() });
    }

    let after_first = &trimmed[3..];

    // The opening delimiter must be alone on its line.
    let Some(after_newline) = after_first
        .strip_prefix('\n')
        .or_else(|| after_first.strip_prefix("\r\n"))
    else {
        return Ok(ParsedDocument { frontmatter: None, body: content.to_string() });
    };

    let Some((yaml_end, body_start)) = find_closing_delimiter(after_newline) else {
        // No closing ---, treat as no frontmatter
        return Ok(ParsedDocument { frontmatter: None, body: content.to_string() });
    };

    let yaml_content = &after_newline[..yaml_end];
    let body = after_newline[body_start..].to_string();

    let frontmatter = if yaml_content.trim().is_empty() {
        Frontmatter::default()
    } else {
        match serde_yaml::from_str::<Value>(yaml_content)? {
            Value::Mapping(fields) => Frontmatter { fields },
            Value::Null => Frontmatter::default(),
            _ => return Err(FrontmatterParseError::NotAMapping),
        }
    };

    Ok(ParsedDocument { frontmatter: Some(frontmatter), body })
}

/// Find the closing `---` line.
///
/// Returns the byte offset where the YAML ends and the offset where the body
/// starts (just past the delimiter's line ending).
fn find_closing_delimiter(content: &str) -> Option<(usize, usize)> {
    let mut pos = 0;
    for line in content.split_inclusive('\n') {
        let bare = line.trim_end_matches(['\n', '\r']);
        if bare.trim_end() == "---" {
            return Some((pos, pos + line.len()));
        }
        pos += line.len();
    }
    None
}

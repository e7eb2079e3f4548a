//! Frontmatter serialization back to markdown.

use super::types::{Frontmatter, ParsedDocument};

/// Serialize a parsed document back to markdown string.
///
/// The body is appended verbatim after the closing delimiter, so
/// `parse(serialize(doc)).body == doc.body`.
pub fn serialize(doc: &ParsedDocument) -> Result<String, serde_yaml::Error> {
    if let Some(fm) = &doc.frontmatter
        && !fm.is_empty()
    {
        let yaml = frontmatter_to_yaml(fm)?;
        return Ok(format!("---\n{}---\n{}", yaml, doc.body));
    }
    Ok(doc.body.clone())
}

/// Serialize a Frontmatter struct to YAML string (without delimiters).
pub fn frontmatter_to_yaml(fm: &Frontmatter) -> Result<String, serde_yaml::Error> {
    let yaml = serde_yaml::to_string(&fm.fields)?;
    if yaml.ends_with('\n') { Ok(yaml) } else { Ok(format!("{yaml}\n")) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontmatter::parser::parse;
    use serde_yaml::{Mapping, Value};

    #[test]
    fn serialize_document_without_frontmatter() {
        let doc =
            ParsedDocument { frontmatter: None, body: "# Hello\n\nWorld".to_string() };
        assert_eq!(serialize(&doc).unwrap(), "# Hello\n\nWorld");
    }

    #[test]
    fn serialize_document_with_frontmatter() {
        let mut fields = Mapping::new();
        fields.insert(Value::from("title"), Value::from("Test"));

        let doc = ParsedDocument {
            frontmatter: Some(Frontmatter { fields }),
            body: "# Content".to_string(),
        };

        let result = serialize(&doc).unwrap();
        assert_eq!(result, "---\ntitle: Test\n---\n# Content");
    }

    #[test]
    fn roundtrip_keeps_body_and_field_order() {
        let original = "---\nzeta: 1\nalpha: two\ntags:\n- a\n- b\n---\n\n# Body\n\ntext #tag\n";
        let parsed = parse(original).unwrap();
        let serialized = serialize(&parsed).unwrap();
        assert_eq!(serialized, original);

        let reparsed = parse(&serialized).unwrap();
        assert_eq!(reparsed.body, parsed.body);
        let keys: Vec<_> = reparsed.frontmatter.unwrap().iter().map(|(k, _)| k.to_string()).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "tags"]);
    }
}

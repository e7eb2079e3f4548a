//! Frontmatter modification operations.

use super::types::{FieldEdit, Frontmatter, ParsedDocument};
use serde_yaml::Value;

/// Apply field edits to a document, creating a frontmatter block if the
/// document has none.
pub fn apply_edits(mut doc: ParsedDocument, edits: &[FieldEdit]) -> ParsedDocument {
    let fm = doc.frontmatter.get_or_insert_with(Frontmatter::default);
    for edit in edits {
        apply_single_edit(fm, edit);
    }
    doc
}

fn apply_single_edit(fm: &mut Frontmatter, edit: &FieldEdit) {
    match edit {
        FieldEdit::Set(field, value) => {
            // IndexMap keeps the slot of an existing key on insert
            fm.fields.insert(Value::String(field.clone()), value.clone());
        }
        FieldEdit::Remove(field) => {
            fm.fields.shift_remove(field.as_str());
        }
    }
}

//! Predicate evaluation against note records.

use serde_json::{Map, Value};

use super::types::{Combine, FilterSet, FilterTerm, Operator};
use crate::bases::BaseConfig;
use crate::vault::NoteRecord;

/// Generic lookup structure built from a note.
///
/// Top level: every raw frontmatter key (lowercased), overridden by the
/// derived note fields. Two synthetic groups sit beside them: `file.*`
/// (name, basename, folder, path, ext, tags, mtime) and `note.*` (the raw
/// frontmatter).
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyBag(Value);

impl PropertyBag {
    pub fn from_note(note: &NoteRecord) -> Self {
        let mut root = Map::new();
        let mut note_group = Map::new();
        for (key, value) in &note.frontmatter {
            root.insert(key.to_lowercase(), value.clone());
            note_group.insert(key.to_lowercase(), value.clone());
        }

        let relative = slash_path(&note.relative_path);
        let tags: Vec<Value> = note.tags.iter().cloned().map(Value::String).collect();

        root.insert("title".into(), Value::String(note.title.clone()));
        root.insert("path".into(), Value::String(relative.clone()));
        root.insert("tags".into(), Value::Array(tags.clone()));
        root.insert("mtime".into(), Value::from(note.modified_ms));

        let derived = [
            ("status", &note.status),
            ("project", &note.project),
            ("date_due", &note.date_due),
            ("date_started", &note.date_started),
            ("date_scheduled", &note.date_scheduled),
            ("recurrence", &note.recurrence),
            ("recurrence_anchor", &note.recurrence_anchor),
            ("priority", &note.priority),
        ];
        for (key, value) in derived {
            if let Some(value) = value {
                root.insert(key.into(), Value::String(value.clone()));
            }
        }
        let times = [("time_tracked", note.time_tracked), ("time_estimate", note.time_estimate)];
        for (key, value) in times {
            if let Some(number) = value.and_then(number_value) {
                root.insert(key.into(), number);
            }
        }

        let folder = note
            .relative_path
            .parent()
            .map(slash_path)
            .unwrap_or_default();
        let ext = note
            .path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_string();
        let name = note
            .path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();

        let mut file = Map::new();
        file.insert("name".into(), Value::String(name));
        file.insert("basename".into(), Value::String(note.basename().to_string()));
        file.insert("folder".into(), Value::String(folder));
        file.insert("path".into(), Value::String(relative));
        file.insert("ext".into(), Value::String(ext));
        file.insert("tags".into(), Value::Array(tags));
        file.insert("mtime".into(), Value::from(note.modified_ms));

        root.insert("file".into(), Value::Object(file));
        root.insert("note".into(), Value::Object(note_group));
        Self(Value::Object(root))
    }

    /// Values at a dot path, flattened to strings. Unresolved paths give an
    /// empty list.
    pub fn values(&self, property: &str) -> Vec<String> {
        let mut current = &self.0;
        for segment in property.split('.') {
            let Some(next) = current.as_object().and_then(|map| lookup(map, segment)) else {
                return Vec::new();
            };
            current = next;
        }
        let mut out = Vec::new();
        flatten(current, &mut out);
        out
    }
}

fn lookup<'v>(map: &'v Map<String, Value>, key: &str) -> Option<&'v Value> {
    map.get(key)
        .or_else(|| map.iter().find(|(k, _)| k.eq_ignore_ascii_case(key)).map(|(_, v)| v))
}

fn flatten(value: &Value, out: &mut Vec<String>) {
    match value {
        Value::String(s) => out.push(s.clone()),
        Value::Number(n) => out.push(n.to_string()),
        Value::Bool(b) => out.push(b.to_string()),
        Value::Array(items) => items.iter().for_each(|item| flatten(item, out)),
        Value::Null | Value::Object(_) => {}
    }
}

/// Whole numbers become integers so `30` reads as "30", not "30.0".
fn number_value(n: f64) -> Option<Value> {
    if n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
        Some(Value::from(n as i64))
    } else {
        serde_json::Number::from_f64(n).map(Value::Number)
    }
}

fn slash_path(path: &std::path::Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

impl FilterTerm {
    pub fn matches(&self, note: &NoteRecord) -> bool {
        self.matches_bag(&PropertyBag::from_note(note))
    }

    pub fn matches_bag(&self, bag: &PropertyBag) -> bool {
        let note_values: Vec<String> =
            bag.values(&self.property).iter().map(|v| v.to_lowercase()).collect();
        let wanted: Vec<String> = self.values.iter().map(|v| v.to_lowercase()).collect();

        let any_substring =
            || wanted.iter().any(|w| note_values.iter().any(|n| n.contains(w.as_str())));
        let any_equal = || wanted.iter().any(|w| note_values.contains(w));

        match &self.operator {
            Operator::Contains | Operator::ContainsAny => any_substring(),
            Operator::NotContains | Operator::NotContainsAny => !any_substring(),
            Operator::Equals => any_equal(),
            Operator::NotEquals => !any_equal(),
            Operator::Unknown(_) => false,
        }
    }
}

impl FilterSet {
    pub fn matches(&self, note: &NoteRecord) -> bool {
        self.matches_bag(&PropertyBag::from_note(note))
    }

    pub fn matches_bag(&self, bag: &PropertyBag) -> bool {
        match self.combine {
            Combine::And => self.terms.iter().all(|t| t.matches_bag(bag)),
            Combine::Or => self.terms.is_empty() || self.terms.iter().any(|t| t.matches_bag(bag)),
        }
    }
}

/// Base filters must match; a named view that exists adds its own filters.
/// An unknown view name adds nothing.
pub fn evaluate(config: &BaseConfig, note: &NoteRecord, view: Option<&str>) -> bool {
    let bag = PropertyBag::from_note(note);
    if !config.filter_set.matches_bag(&bag) {
        return false;
    }
    match view.and_then(|name| config.view(name)) {
        Some(view) => view.filter_set.matches_bag(&bag),
        None => true,
    }
}

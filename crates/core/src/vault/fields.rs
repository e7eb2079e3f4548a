//! Logical note fields and the frontmatter keys they may be spelled as.

use serde_yaml::Value;

use crate::frontmatter::Frontmatter;

/// A metadata field with a fixed meaning, independent of how a given note
/// spells its key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoteField {
    Status,
    Project,
    DateDue,
    DateStarted,
    DateScheduled,
    Recurrence,
    RecurrenceAnchor,
    Priority,
    TimeTracked,
    TimeEstimate,
}

impl NoteField {
    pub const ALL: [NoteField; 10] = [
        Self::Status,
        Self::Project,
        Self::DateDue,
        Self::DateStarted,
        Self::DateScheduled,
        Self::Recurrence,
        Self::RecurrenceAnchor,
        Self::Priority,
        Self::TimeTracked,
        Self::TimeEstimate,
    ];

    /// Candidate keys in priority order. The first entry is the canonical
    /// spelling used when a field is written to a note that has none.
    pub const fn keys(self) -> &'static [&'static str] {
        match self {
            Self::Status => &["status", "Status"],
            Self::Project => &["project", "projects", "Project", "Projects"],
            Self::DateDue => &["date_due", "dateDue", "DateDue", "due", "Due"],
            Self::DateStarted => {
                &["date_started", "dateStarted", "DateStarted", "start", "Start"]
            }
            Self::DateScheduled => &[
                "date_scheduled",
                "dateScheduled",
                "DateScheduled",
                "scheduled",
                "Scheduled",
            ],
            Self::Recurrence => &["recurrence", "Recurrence"],
            Self::RecurrenceAnchor => {
                &["recurrence_anchor", "recurrenceAnchor", "RecurrenceAnchor"]
            }
            Self::Priority => &["priority", "Priority"],
            Self::TimeTracked => &["time_tracked", "timeTracked", "TimeTracked"],
            Self::TimeEstimate => &["time_estimate", "timeEstimate", "TimeEstimate"],
        }
    }

    pub const fn canonical(self) -> &'static str {
        self.keys()[0]
    }

    /// Keys of this field that are actually present in `fm`, in candidate order.
    pub fn present_keys(self, fm: &Frontmatter) -> Vec<&'static str> {
        self.keys().iter().copied().filter(|k| fm.contains_key(k)).collect()
    }

    /// First candidate key holding a usable value, rendered as a trimmed
    /// string. Lists contribute their first usable element.
    pub fn read_str(self, fm: &Frontmatter) -> Option<String> {
        self.keys().iter().find_map(|key| fm.get(key).and_then(scalar_string))
    }

    /// First candidate key holding a number or a numeric string.
    pub fn read_number(self, fm: &Frontmatter) -> Option<f64> {
        self.keys().iter().find_map(|key| match fm.get(key)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        })
    }
}

fn scalar_string(value: &Value) -> Option<String> {
    let s = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Sequence(seq) => return seq.iter().find_map(scalar_string),
        _ => return None,
    };
    (!s.is_empty()).then_some(s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontmatter::parse;

    fn fm(yaml: &str) -> Frontmatter {
        parse(&format!("---\n{yaml}\n---\n")).unwrap().frontmatter.unwrap()
    }

    #[test]
    fn first_present_spelling_wins() {
        let fm = fm("Status: Waiting\nstatus: open");
        assert_eq!(NoteField::Status.read_str(&fm).as_deref(), Some("open"));
    }

    #[test]
    fn camel_case_spelling_is_accepted() {
        let fm = fm("dateDue: 2025-10-26");
        assert_eq!(NoteField::DateDue.read_str(&fm).as_deref(), Some("2025-10-26"));
    }

    #[test]
    fn empty_value_falls_through_to_next_key() {
        let fm = fm("due: ''\nDue: 2025-01-02");
        assert_eq!(NoteField::DateDue.read_str(&fm).as_deref(), Some("2025-01-02"));
    }

    #[test]
    fn list_value_uses_first_entry() {
        let fm = fm("projects:\n  - '[[Alpha]]'\n  - '[[Beta]]'");
        assert_eq!(NoteField::Project.read_str(&fm).as_deref(), Some("[[Alpha]]"));
    }

    #[test]
    fn numeric_string_is_a_number() {
        let fm = fm("timeEstimate: '2.5'\ntime_tracked: 3");
        assert_eq!(NoteField::TimeEstimate.read_number(&fm), Some(2.5));
        assert_eq!(NoteField::TimeTracked.read_number(&fm), Some(3.0));
    }

    #[test]
    fn present_keys_lists_every_spelling() {
        let fm = fm("status: a\nStatus: b\ntitle: x");
        assert_eq!(NoteField::Status.present_keys(&fm), vec!["status", "Status"]);
        assert!(NoteField::Priority.present_keys(&fm).is_empty());
    }
}

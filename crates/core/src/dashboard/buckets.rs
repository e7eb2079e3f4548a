//! Status groups for the todo and project lists.

use std::cmp::Ordering;

use serde::Serialize;

use super::classify::ClassifiedNote;
use crate::vault::{NoteRecord, sort_by_modified_desc};

/// Todo list sections, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TodoBucket {
    InProgress,
    UpNext,
    Todo,
    HoldStuck,
    Waiting,
    Someday,
}

impl TodoBucket {
    pub const ALL: [TodoBucket; 6] = [
        Self::InProgress,
        Self::UpNext,
        Self::Todo,
        Self::HoldStuck,
        Self::Waiting,
        Self::Someday,
    ];

    /// Bucket for a (lowercased) status. Done, canceled and unrecognised
    /// statuses belong to no bucket; a missing status is `Todo`.
    pub fn of(status: Option<&str>) -> Option<Self> {
        match status.map(str::trim) {
            None | Some("") => Some(Self::Todo),
            Some("in-progress") => Some(Self::InProgress),
            Some("next" | "up next") => Some(Self::UpNext),
            Some("todo" | "not started" | "open") => Some(Self::Todo),
            Some("hold/stuck" | "stuck" | "hold") => Some(Self::HoldStuck),
            Some("waiting") => Some(Self::Waiting),
            Some("someday") => Some(Self::Someday),
            Some(_) => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::InProgress => "In Progress",
            Self::UpNext => "Up Next",
            Self::Todo => "Todo",
            Self::HoldStuck => "Hold/Stuck",
            Self::Waiting => "Waiting",
            Self::Someday => "Someday",
        }
    }

    /// Status written when a note is moved into this bucket.
    pub fn status(self) -> &'static str {
        match self {
            Self::InProgress => "in-progress",
            Self::UpNext => "next",
            Self::Todo => "todo",
            Self::HoldStuck => "hold/stuck",
            Self::Waiting => "waiting",
            Self::Someday => "someday",
        }
    }
}

/// Project list sections, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectBucket {
    Planning,
    InProgress,
    Active,
    OnHold,
    Other,
}

impl ProjectBucket {
    pub const ALL: [ProjectBucket; 5] =
        [Self::Planning, Self::InProgress, Self::Active, Self::OnHold, Self::Other];

    pub fn of(status: Option<&str>) -> Self {
        match status.map(str::trim) {
            Some("planning") => Self::Planning,
            Some("in-progress") => Self::InProgress,
            Some("active") => Self::Active,
            Some("on-hold" | "hold" | "paused") => Self::OnHold,
            _ => Self::Other,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Planning => "Planning",
            Self::InProgress => "In Progress",
            Self::Active => "Active",
            Self::OnHold => "On Hold",
            Self::Other => "Other",
        }
    }
}

/// Priority ascending (present first), then due date ascending (present
/// first), then newest first.
pub fn todo_order(a: &NoteRecord, b: &NoteRecord) -> Ordering {
    present_first(a.priority.as_deref(), b.priority.as_deref())
        .then_with(|| present_first(a.date_due.as_deref(), b.date_due.as_deref()))
        .then_with(|| b.modified_ms.cmp(&a.modified_ms))
}

fn present_first(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.to_lowercase().cmp(&b.to_lowercase()),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn title_matches(note: &NoteRecord, search: Option<&str>) -> bool {
    match search.map(str::trim).filter(|s| !s.is_empty()) {
        Some(search) => note.title.to_lowercase().contains(&search.to_lowercase()),
        None => true,
    }
}

/// One titled section of a list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Group<B> {
    pub bucket: B,
    pub notes: Vec<NoteRecord>,
}

/// Todo notes grouped by status.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TodoList {
    /// Todo notes before search and truncation.
    pub total: usize,
    pub groups: Vec<Group<TodoBucket>>,
}

impl TodoList {
    /// Search by title, order with [`todo_order`], keep `max_results`, then
    /// group; each group is newest first.
    pub fn build(notes: &[ClassifiedNote], search: Option<&str>, max_results: usize) -> Self {
        let todos: Vec<&NoteRecord> =
            notes.iter().filter(|n| n.is_todo).map(|n| &n.note).collect();
        let total = todos.len();

        let mut matched: Vec<NoteRecord> =
            todos.into_iter().filter(|n| title_matches(n, search)).cloned().collect();
        matched.sort_by(todo_order);
        matched.truncate(max_results);

        let groups = TodoBucket::ALL
            .into_iter()
            .map(|bucket| {
                let mut notes: Vec<NoteRecord> = matched
                    .iter()
                    .filter(|n| TodoBucket::of(n.status.as_deref()) == Some(bucket))
                    .cloned()
                    .collect();
                sort_by_modified_desc(&mut notes);
                Group { bucket, notes }
            })
            .collect();

        Self { total, groups }
    }

    pub fn len(&self) -> usize {
        self.groups.iter().map(|g| g.notes.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True when `title` matches no todo exactly (case-insensitive), so a
    /// new todo by that name would not duplicate one.
    pub fn offers_create(notes: &[ClassifiedNote], title: &str) -> bool {
        let title = title.trim().to_lowercase();
        !title.is_empty()
            && !notes.iter().any(|n| n.is_todo && n.note.title.to_lowercase() == title)
    }
}

/// Project notes grouped by status.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectList {
    pub total: usize,
    pub groups: Vec<Group<ProjectBucket>>,
}

impl ProjectList {
    pub fn build(notes: &[ClassifiedNote], search: Option<&str>, max_results: usize) -> Self {
        let projects: Vec<&NoteRecord> =
            notes.iter().filter(|n| n.is_project).map(|n| &n.note).collect();
        let total = projects.len();

        let mut matched: Vec<NoteRecord> =
            projects.into_iter().filter(|n| title_matches(n, search)).cloned().collect();
        sort_by_modified_desc(&mut matched);
        matched.truncate(max_results);

        let groups = ProjectBucket::ALL
            .into_iter()
            .map(|bucket| Group {
                bucket,
                notes: matched
                    .iter()
                    .filter(|n| ProjectBucket::of(n.status.as_deref()) == bucket)
                    .cloned()
                    .collect(),
            })
            .collect();

        Self { total, groups }
    }

    pub fn len(&self) -> usize {
        self.groups.iter().map(|g| g.notes.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{BTreeMap, BTreeSet};
    use std::path::PathBuf;

    fn note(title: &str, status: Option<&str>, priority: Option<&str>, due: Option<&str>, mtime: i64) -> NoteRecord {
        NoteRecord {
            path: PathBuf::from(format!("/v/{title}.md")),
            relative_path: PathBuf::from(format!("{title}.md")),
            title: title.to_string(),
            tags: BTreeSet::new(),
            modified_ms: mtime,
            frontmatter: BTreeMap::new(),
            status: status.map(str::to_string),
            project: None,
            date_due: due.map(str::to_string),
            date_started: None,
            date_scheduled: None,
            recurrence: None,
            recurrence_anchor: None,
            priority: priority.map(str::to_string),
            time_tracked: None,
            time_estimate: None,
        }
    }

    fn todo(n: NoteRecord) -> ClassifiedNote {
        ClassifiedNote { note: n, is_todo: true, is_project: false }
    }

    fn titles(notes: &[NoteRecord]) -> Vec<&str> {
        notes.iter().map(|n| n.title.as_str()).collect()
    }

    #[test]
    fn test_todo_buckets() {
        assert_eq!(TodoBucket::of(None), Some(TodoBucket::Todo));
        assert_eq!(TodoBucket::of(Some("open")), Some(TodoBucket::Todo));
        assert_eq!(TodoBucket::of(Some("up next")), Some(TodoBucket::UpNext));
        assert_eq!(TodoBucket::of(Some("stuck")), Some(TodoBucket::HoldStuck));
        assert_eq!(TodoBucket::of(Some("done")), None);
        assert_eq!(TodoBucket::of(Some("canceled")), None);
    }

    #[test]
    fn test_project_buckets() {
        assert_eq!(ProjectBucket::of(Some("paused")), ProjectBucket::OnHold);
        assert_eq!(ProjectBucket::of(Some("active")), ProjectBucket::Active);
        assert_eq!(ProjectBucket::of(Some("done")), ProjectBucket::Other);
        assert_eq!(ProjectBucket::of(None), ProjectBucket::Other);
    }

    #[test]
    fn test_todo_order() {
        let mut notes = vec![
            note("none-old", None, None, None, 1),
            note("none-new", None, None, None, 2),
            note("due-late", None, None, Some("2025-12-01"), 0),
            note("due-soon", None, None, Some("2025-10-01"), 0),
            note("p2", None, Some("2-normal"), None, 0),
            note("p1-due", None, Some("1-high"), Some("2025-11-01"), 0),
            note("p1", None, Some("1-high"), None, 0),
        ];
        notes.sort_by(todo_order);
        assert_eq!(
            titles(&notes),
            vec!["p1-due", "p1", "p2", "due-soon", "due-late", "none-new", "none-old"]
        );
    }

    #[test]
    fn test_todo_list_groups_search_and_truncate() {
        let notes = vec![
            todo(note("Fix sink", Some("in-progress"), None, None, 5)),
            todo(note("Fix roof", None, Some("1"), None, 1)),
            todo(note("Paint fence", Some("waiting"), None, None, 3)),
            todo(note("Fix door", Some("done"), None, None, 9)),
            ClassifiedNote { note: note("Fix house", None, None, None, 7), is_todo: false, is_project: true },
        ];

        let list = TodoList::build(&notes, Some("FIX"), 500);
        assert_eq!(list.total, 4);
        assert_eq!(list.groups.len(), TodoBucket::ALL.len());
        assert_eq!(titles(&list.groups[0].notes), vec!["Fix sink"]);
        assert_eq!(titles(&list.groups[2].notes), vec!["Fix roof"]);
        assert!(list.groups[4].notes.is_empty());
        assert_eq!(list.len(), 2);

        // the priority note sorts first, so it survives truncation
        let capped = TodoList::build(&notes, None, 1);
        assert_eq!(capped.len(), 1);
        assert_eq!(titles(&capped.groups[2].notes), vec!["Fix roof"]);
    }

    #[test]
    fn test_offers_create() {
        let notes = vec![todo(note("Buy Milk", None, None, None, 0))];
        assert!(!TodoList::offers_create(&notes, " buy milk "));
        assert!(TodoList::offers_create(&notes, "buy bread"));
        assert!(!TodoList::offers_create(&notes, "  "));
    }

    #[test]
    fn test_project_list() {
        let project = |n| ClassifiedNote { note: n, is_todo: false, is_project: true };
        let notes = vec![
            project(note("Garden", Some("active"), None, None, 1)),
            project(note("Garage", Some("active"), None, None, 2)),
            project(note("Attic", Some("archived"), None, None, 3)),
            todo(note("Sweep", None, None, None, 4)),
        ];
        let list = ProjectList::build(&notes, None, 500);
        assert_eq!(list.total, 3);
        assert_eq!(titles(&list.groups[2].notes), vec!["Garage", "Garden"]);
        assert_eq!(titles(&list.groups[4].notes), vec!["Attic"]);
    }
}

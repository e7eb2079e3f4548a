//! Table rendering for the todo and project lists.

use chrono::{DateTime, Local, NaiveDate};
use tabled::{settings::Style, Table, Tabled};
use vaultdash_core::dashboard::{short_date, DueState, Group};
use vaultdash_core::NoteRecord;

#[derive(Tabled)]
struct TodoRow {
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Priority")]
    priority: String,
    #[tabled(rename = "Due")]
    due: String,
    #[tabled(rename = "Project")]
    project: String,
}

#[derive(Tabled)]
struct ProjectRow {
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Due")]
    due: String,
    #[tabled(rename = "Modified")]
    modified: String,
}

/// `[[House]]` → `House`.
pub fn project_label(project: &str) -> &str {
    project.trim().trim_start_matches("[[").trim_end_matches("]]")
}

/// Short due date with a marker for overdue and today.
pub fn due_label(due: Option<&str>, today: NaiveDate) -> String {
    let Some(due) = due else {
        return String::new();
    };
    let short = short_date(due);
    match DueState::of(due, today) {
        Some(DueState::Overdue) => format!("{short} (overdue)"),
        Some(DueState::Today) => format!("{short} (today)"),
        _ => short,
    }
}

fn modified_label(ms: i64) -> String {
    DateTime::from_timestamp_millis(ms)
        .map(|dt| dt.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default()
}

fn todo_row(note: &NoteRecord, today: NaiveDate) -> TodoRow {
    TodoRow {
        title: note.title.clone(),
        status: note.status.clone().unwrap_or_default(),
        priority: note.priority.clone().unwrap_or_default(),
        due: due_label(note.date_due.as_deref(), today),
        project: note.project.as_deref().map(project_label).unwrap_or_default().to_string(),
    }
}

fn project_row(note: &NoteRecord, today: NaiveDate) -> ProjectRow {
    ProjectRow {
        title: note.title.clone(),
        status: note.status.clone().unwrap_or_default(),
        due: due_label(note.date_due.as_deref(), today),
        modified: modified_label(note.modified_ms),
    }
}

fn print_heading(label: &str, count: usize) {
    println!("{} ({})", label.to_uppercase(), count);
}

/// Print every non-empty todo group as a titled table.
pub fn print_todo_groups<B: Copy>(
    groups: &[Group<B>],
    label: impl Fn(B) -> &'static str,
    today: NaiveDate,
) {
    for group in groups.iter().filter(|g| !g.notes.is_empty()) {
        print_heading(label(group.bucket), group.notes.len());
        let rows: Vec<TodoRow> = group.notes.iter().map(|n| todo_row(n, today)).collect();
        println!("{}", Table::new(&rows).with(Style::rounded()));
        println!();
    }
}

/// Print every non-empty project group as a titled table.
pub fn print_project_groups<B: Copy>(
    groups: &[Group<B>],
    label: impl Fn(B) -> &'static str,
    today: NaiveDate,
) {
    for group in groups.iter().filter(|g| !g.notes.is_empty()) {
        print_heading(label(group.bucket), group.notes.len());
        let rows: Vec<ProjectRow> = group.notes.iter().map(|n| project_row(n, today)).collect();
        println!("{}", Table::new(&rows).with(Style::rounded()));
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn project_label_strips_wiki_brackets() {
        assert_eq!(project_label("[[House]]"), "House");
        assert_eq!(project_label("House"), "House");
    }

    #[test]
    fn due_label_marks_overdue_and_today() {
        let today = day("2025-10-26");
        assert_eq!(due_label(Some("2025-10-20"), today), "Oct 20 (overdue)");
        assert_eq!(due_label(Some("2025-10-26T09:00"), today), "Oct 26 (today)");
        assert_eq!(due_label(Some("2025-11-02"), today), "Nov 2");
        assert_eq!(due_label(Some("soon"), today), "soon");
        assert_eq!(due_label(None, today), "");
    }
}

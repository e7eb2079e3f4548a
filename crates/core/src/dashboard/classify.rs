//! Tagging scanned notes as todos and/or projects.

use serde::Serialize;

use crate::bases::BaseConfig;
use crate::filter::evaluate;
use crate::vault::{Decision, NoteRecord};

/// A note annotated with the lists it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassifiedNote {
    #[serde(flatten)]
    pub note: NoteRecord,
    pub is_todo: bool,
    pub is_project: bool,
}

/// Evaluates the todo and project bases (each with an optional view) against
/// a note.
#[derive(Debug, Clone, Copy)]
pub struct Classifier<'a> {
    todo: &'a BaseConfig,
    todo_view: Option<&'a str>,
    project: &'a BaseConfig,
    project_view: Option<&'a str>,
}

impl<'a> Classifier<'a> {
    pub fn new(
        todo: &'a BaseConfig,
        todo_view: Option<&'a str>,
        project: &'a BaseConfig,
        project_view: Option<&'a str>,
    ) -> Self {
        Self { todo, todo_view, project, project_view }
    }

    /// Keep notes matching either base; drop the rest.
    pub fn classify(&self, note: NoteRecord) -> Decision<ClassifiedNote> {
        let is_todo = evaluate(self.todo, &note, self.todo_view);
        let is_project = evaluate(self.project, &note, self.project_view);
        if is_todo || is_project {
            Decision::Keep(ClassifiedNote { note, is_todo, is_project })
        } else {
            Decision::Drop
        }
    }
}

/// Scanner callback built from a [`Classifier`].
pub fn classify<'a>(
    todo: &'a BaseConfig,
    todo_view: Option<&'a str>,
    project: &'a BaseConfig,
    project_view: Option<&'a str>,
) -> impl Fn(NoteRecord) -> Decision<ClassifiedNote> + 'a {
    let classifier = Classifier::new(todo, todo_view, project, project_view);
    move |note| classifier.classify(note)
}

/// Sorted, deduplicated titles of project notes.
pub fn project_names(notes: &[ClassifiedNote]) -> Vec<String> {
    let mut names: Vec<String> =
        notes.iter().filter(|n| n.is_project).map(|n| n.note.title.clone()).collect();
    names.sort_by_key(|n| n.to_lowercase());
    names.dedup();
    names
}

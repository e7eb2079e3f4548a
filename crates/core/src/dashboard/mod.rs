//! Todo and project lists over a scanned vault.
//!
//! Two base files decide which notes are todos and which are projects. The
//! classified notes are grouped into status buckets for display.

pub mod buckets;
pub mod classify;
pub mod due;
pub mod guard;
pub mod load;

pub use buckets::{Group, ProjectBucket, ProjectList, TodoBucket, TodoList, todo_order};
pub use classify::{ClassifiedNote, Classifier, classify, project_names};
pub use due::{DueState, short_date};
pub use guard::{LoadGuard, LoadTicket};
pub use load::{Dashboard, DashboardError, DashboardRequest};

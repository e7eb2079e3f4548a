//! End-to-end flows: base files, scan, classify, mutate.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::{TempDir, tempdir};
use vaultdash_core::bases::{BaseConfig, VaultRoot, load_config};
use vaultdash_core::cache::VaultCache;
use vaultdash_core::dashboard::{Dashboard, DashboardRequest, LoadGuard, TodoBucket};
use vaultdash_core::filter::{evaluate, parse_term};
use vaultdash_core::frontmatter;
use vaultdash_core::mutate::{MODIFIED_KEY, set_status};
use vaultdash_core::vault::{Decision, VaultScanner};

const TODO_BASE: &str = r#"
filters:
  or:
    - tags.containsAny("proj/todo", "other/todo")
views:
  - type: table
    name: Open
    filters:
      and:
        - '!status == "done"'
"#;

const PROJECT_BASE: &str = r#"
filters:
  and:
    - tags.contains("proj/project")
"#;

struct Fixture {
    _tmp: TempDir,
    vault: PathBuf,
    todo_base: PathBuf,
    project_base: PathBuf,
}

fn fixture() -> Fixture {
    let tmp = tempdir().unwrap();
    let vault = tmp.path().join("Vault");
    fs::create_dir_all(vault.join(".obsidian")).unwrap();
    fs::create_dir_all(vault.join("System/Bases/Lists")).unwrap();
    fs::create_dir_all(vault.join("Tasks")).unwrap();

    let todo_base = vault.join("System/Bases/Lists/todo.base");
    let project_base = vault.join("System/Bases/Lists/projects.base");
    fs::write(&todo_base, TODO_BASE).unwrap();
    fs::write(&project_base, PROJECT_BASE).unwrap();

    fs::write(
        vault.join("Tasks/Fix sink.md"),
        "---\ntags: [proj/todo]\nstatus: open\n---\nCall the plumber #urgent\n",
    )
    .unwrap();
    fs::write(vault.join("Tasks/Paint.md"), "---\nstatus: in-progress\n---\n#other/todo\n").unwrap();
    fs::write(vault.join("Tasks/Old.md"), "---\ntags: proj/todo\nstatus: done\n---\n").unwrap();
    fs::write(vault.join("House.md"), "---\ntags: [proj/project]\nstatus: active\n---\n").unwrap();
    fs::write(vault.join("Unrelated.md"), "# Just a note\n").unwrap();

    Fixture { _tmp: tmp, vault, todo_base, project_base }
}

fn note_named<'a>(notes: &'a [vaultdash_core::NoteRecord], title: &str) -> &'a vaultdash_core::NoteRecord {
    notes.iter().find(|n| n.title == title).unwrap()
}

#[test]
fn metadata_and_inline_tags_are_unioned() {
    let f = fixture();
    let notes = VaultScanner::new(&f.vault).scan().unwrap();
    let sink = note_named(&notes, "Fix sink");
    let tags: Vec<&str> = sink.tags.iter().map(String::as_str).collect();
    assert_eq!(tags, vec!["proj/todo", "urgent"]);
}

#[test]
fn contains_any_and_negated_contains() {
    let f = fixture();
    let notes = VaultScanner::new(&f.vault).scan().unwrap();
    let mut sink = note_named(&notes, "Fix sink").clone();
    sink.tags.remove("urgent");

    let any = parse_term(r#"tags.containsAny("proj/todo","other/todo")"#).unwrap();
    let not = parse_term(r#"!tags.contains("proj/todo")"#).unwrap();
    assert!(any.matches(&sink));
    assert!(!not.matches(&sink));
}

#[test]
fn base_without_filters_matches_everything() {
    let f = fixture();
    let path = f.vault.join("System/all.base");
    fs::write(&path, "views:\n  - name: All\n").unwrap();
    let config = load_config(&path, ".obsidian").unwrap();

    let notes = VaultScanner::new(&f.vault).scan().unwrap();
    assert_eq!(notes.len(), 5);
    assert!(notes.iter().all(|n| evaluate(&config, n, None)));
    assert!(notes.iter().all(|n| evaluate(&config, n, Some("All"))));
}

#[test]
fn vault_root_is_marker_parent() {
    let f = fixture();
    let config = BaseConfig::load(&f.todo_base, ".obsidian").unwrap();
    assert_eq!(config.vault_root, Some(VaultRoot::Marker(f.vault.clone())));
}

#[test]
fn view_narrows_and_unknown_view_is_ignored() {
    let f = fixture();
    let config = load_config(&f.todo_base, ".obsidian").unwrap();
    let notes = VaultScanner::new(&f.vault).scan().unwrap();
    let old = note_named(&notes, "Old");

    assert!(evaluate(&config, old, None));
    assert!(!evaluate(&config, old, Some("Open")));
    assert!(evaluate(&config, old, Some("No such view")));
}

#[test]
fn set_status_then_rescan_reclassifies() {
    let f = fixture();
    let config = load_config(&f.todo_base, ".obsidian").unwrap();
    let sink_path = f.vault.join("Tasks/Fix sink.md");

    let open_titles = |vault: &Path| -> Vec<String> {
        let mut titles = VaultScanner::new(vault)
            .scan_with(|n| {
                if evaluate(&config, &n, Some("Open")) { Decision::Keep(n.title) } else { Decision::Drop }
            })
            .unwrap();
        titles.sort();
        titles
    };
    assert_eq!(open_titles(&f.vault), vec!["Fix sink", "Paint"]);

    set_status(&sink_path, "done").unwrap();
    assert_eq!(open_titles(&f.vault), vec!["Paint"]);

    let written = fs::read_to_string(&sink_path).unwrap();
    let doc = frontmatter::parse(&written).unwrap();
    let fm = doc.frontmatter.unwrap();
    assert_eq!(fm.get_str("status"), Some("done"));
    assert!(fm.get_str(MODIFIED_KEY).is_some());
    assert_eq!(doc.body, "Call the plumber #urgent\n");
}

#[test]
fn dashboard_load_groups_notes() {
    let f = fixture();
    let cache = VaultCache::open_in_memory().unwrap();
    let guard = LoadGuard::new();
    let mut request = DashboardRequest::new(&f.todo_base, &f.project_base);
    request.todo_view = Some("Open");

    let dashboard = Dashboard::load(&request, Some(&cache), &guard).unwrap().unwrap();
    assert!(dashboard.vault_root.is_confirmed());
    assert!(!guard.is_loading());

    let todos = dashboard.todos(None, 500);
    assert_eq!(todos.total, 2);
    let in_progress = &todos.groups[0];
    assert_eq!(in_progress.bucket, TodoBucket::InProgress);
    assert_eq!(in_progress.notes[0].title, "Paint");

    let projects = dashboard.projects(None, 500);
    assert_eq!(projects.total, 1);
    assert_eq!(dashboard.project_names(), vec!["House".to_string()]);

    // the cache holds every note, not only the classified ones
    let root = f.vault.canonicalize().unwrap();
    assert_eq!(cache.get(&root).map(|n| n.len()), Some(5));
}

#[test]
fn dashboard_load_is_noop_while_another_runs() {
    let f = fixture();
    let guard = LoadGuard::new();
    let _ticket = guard.try_begin().unwrap();
    let request = DashboardRequest::new(&f.todo_base, &f.project_base);

    assert!(Dashboard::load(&request, None, &guard).unwrap().is_none());
}

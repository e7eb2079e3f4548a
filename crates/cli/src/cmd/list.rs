//! `vdash todos` and `vdash projects`.

use std::path::Path;

use chrono::Local;
use tracing::error;
use vaultdash_core::config::ResolvedConfig;
use vaultdash_core::dashboard::{
    Dashboard, DashboardRequest, LoadGuard, ProjectBucket, TodoBucket, TodoList,
};

use super::output::{print_project_groups, print_todo_groups};
use crate::ListArgs;

static LOAD_GUARD: LoadGuard = LoadGuard::new();

fn load(rc: &ResolvedConfig, args: &ListArgs, for_todos: bool) -> Dashboard {
    let mut request = DashboardRequest::new(&rc.todo_base, &rc.project_base);
    let view = args.view.as_deref().filter(|v| !v.trim().is_empty());
    request.todo_view = rc.todo_view.as_deref();
    request.project_view = rc.project_view.as_deref();
    if for_todos {
        request.todo_view = view.or(request.todo_view);
    } else {
        request.project_view = view.or(request.project_view);
    }
    request.vault_marker = rc.vault_marker.as_str();
    request.excluded_folders = rc.excluded_folders.clone();
    request.max_files = rc.max_files;
    request.max_age = rc.cache.max_age;
    request.rebuild = args.rebuild;

    let cache = super::open_cache(rc);
    match Dashboard::load(&request, cache.as_ref(), &LOAD_GUARD) {
        Ok(Some(dashboard)) => dashboard,
        Ok(None) => {
            error!("Another load is already running");
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("Error serializing output: {e}");
            std::process::exit(1);
        }
    }
}

pub fn run_todos(config: Option<&Path>, profile: Option<&str>, args: &ListArgs) {
    let rc = super::load_config(config, profile);
    let dashboard = load(&rc, args, true);
    let limit = args.limit.unwrap_or(rc.max_results);
    let search = args.search.as_deref();
    let list = dashboard.todos(search, limit);

    if args.json {
        print_json(&list);
        return;
    }

    if list.is_empty() {
        println!("(no todos found)");
    } else {
        print_todo_groups(&list.groups, TodoBucket::label, Local::now().date_naive());
        if list.len() < list.total {
            println!("showing {} of {} todos", list.len(), list.total);
        }
    }

    if let Some(title) = search {
        if TodoList::offers_create(&dashboard.notes, title) {
            let title = title.trim();
            println!("No todo named \"{title}\". Create it with: vdash new todo \"{title}\"");
        }
    }
}

pub fn run_projects(config: Option<&Path>, profile: Option<&str>, args: &ListArgs) {
    let rc = super::load_config(config, profile);
    let dashboard = load(&rc, args, false);
    let limit = args.limit.unwrap_or(rc.max_results);
    let list = dashboard.projects(args.search.as_deref(), limit);

    if args.json {
        print_json(&list);
        return;
    }

    if list.is_empty() {
        println!("(no projects found)");
        return;
    }
    print_project_groups(&list.groups, ProjectBucket::label, Local::now().date_naive());
    if list.len() < list.total {
        println!("showing {} of {} projects", list.len(), list.total);
    }
}

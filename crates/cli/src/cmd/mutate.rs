//! `vdash status`, `vdash project` and `vdash date`.

use std::path::Path;

use chrono::NaiveDate;
use tracing::info;
use vaultdash_core::config::ResolvedConfig;
use vaultdash_core::mutate::{
    set_date_field, set_project_field, set_status, DateField, MutateError,
};

use crate::{DateArgs, ProjectArgs, StatusArgs};

fn finish(rc: &ResolvedConfig, note: &Path, result: Result<(), MutateError>, what: &str) {
    match result {
        Ok(()) => {
            info!("Updated {}: {}", note.display(), what);
            println!("Updated {}: {}", note.display(), what);
            super::invalidate_vault(rc);
        }
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

pub fn run_status(config: Option<&Path>, profile: Option<&str>, args: &StatusArgs) {
    let rc = super::load_config(config, profile);
    let result = set_status(&args.note, &args.status);
    finish(&rc, &args.note, result, &format!("status = {}", args.status.trim()));
}

pub fn run_project(config: Option<&Path>, profile: Option<&str>, args: &ProjectArgs) {
    let rc = super::load_config(config, profile);
    let project = if args.clear { None } else { args.name.as_deref() };
    let result = set_project_field(&args.note, project);
    let what = match project {
        Some(name) => format!("project = {}", name.trim()),
        None => "project cleared".to_string(),
    };
    finish(&rc, &args.note, result, &what);
}

pub fn run_date(config: Option<&Path>, profile: Option<&str>, args: &DateArgs) {
    let field: DateField = match args.field.parse() {
        Ok(field) => field,
        Err(e) => {
            eprintln!("Error: {e} (expected due, started or scheduled)");
            std::process::exit(2);
        }
    };
    let date = match (args.clear, args.date.as_deref()) {
        (true, _) | (false, None) => None,
        (false, Some(raw)) => match NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d") {
            Ok(date) => Some(date),
            Err(_) => {
                eprintln!("Error: invalid date {raw:?} (expected YYYY-MM-DD)");
                std::process::exit(2);
            }
        },
    };

    let rc = super::load_config(config, profile);
    let result = set_date_field(&args.note, field, date);
    let what = match date {
        Some(date) => format!("{} = {}", args.field.trim().to_lowercase(), date.format("%Y-%m-%d")),
        None => format!("{} cleared", args.field.trim().to_lowercase()),
    };
    finish(&rc, &args.note, result, &what);
}

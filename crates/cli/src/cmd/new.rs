//! `vdash new`: create a todo or project note the matching base will pick up.

use std::path::Path;

use vaultdash_core::bases::BaseConfig;
use vaultdash_core::mutate::{create_note, NewNoteKind};

use crate::{NewArgs, NewKind};

pub fn run(config: Option<&Path>, profile: Option<&str>, args: &NewArgs) {
    let rc = super::load_config(config, profile);

    let (base_path, kind) = match args.kind {
        NewKind::Todo => (&rc.todo_base, NewNoteKind::Todo),
        NewKind::Project => (&rc.project_base, NewNoteKind::Project),
    };
    let base = match BaseConfig::load(base_path, &rc.vault_marker) {
        Ok(base) => base,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };
    let Some(root) = &base.vault_root else {
        eprintln!("Error: could not locate a vault for {}", base_path.display());
        std::process::exit(1);
    };

    // The first tag the base selects on makes the new note show up in it
    let tags = base.tag_values();
    let dir = rc.new_note_dir_in(root.path());
    match create_note(&dir, &args.title, kind, tags.first().map(String::as_str)) {
        Ok(path) => {
            println!("Created {}", path.display());
            super::invalidate_vault(&rc);
        }
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

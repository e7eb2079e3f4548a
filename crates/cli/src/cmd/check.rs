//! `vdash check`: show how a base file parses and how many notes it selects.

use std::path::Path;

use vaultdash_core::bases::{BaseConfig, VaultRoot, DEFAULT_VAULT_MARKER};
use vaultdash_core::config::ConfigLoader;
use vaultdash_core::evaluate;
use vaultdash_core::vault::{Decision, VaultScanner};

use crate::CheckArgs;

pub fn run(config: Option<&Path>, profile: Option<&str>, args: &CheckArgs) {
    // A config is optional here; it only supplies the vault marker
    let marker = match ConfigLoader::load(config, profile) {
        Ok(rc) => {
            crate::logging::init(&rc);
            rc.vault_marker
        }
        Err(_) => DEFAULT_VAULT_MARKER.to_string(),
    };

    let base = match BaseConfig::load(&args.base, &marker) {
        Ok(base) => base,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    println!("base: {}", base.source.display());
    match &base.vault_root {
        Some(VaultRoot::Marker(path)) => println!("vault_root: {}", path.display()),
        Some(VaultRoot::Fallback(path)) => {
            println!("vault_root: {} (guessed, no {} found)", path.display(), marker)
        }
        None => println!("vault_root: (none)"),
    }
    println!("filters:");
    println!("{}", indent(&base.filter_set.to_string(), 2));

    if base.views.is_empty() {
        println!("views: (none)");
    } else {
        println!("views:");
        for view in &base.views {
            println!("  {} ({})", view.name, view.kind);
            println!("{}", indent(&view.filter_set.to_string(), 4));
        }
    }

    let view = args.view.as_deref();
    if let Some(name) = view {
        if base.view(name).is_none() {
            println!("warning: no view named {name:?}; only the base filters apply");
        }
    }

    let Some(root) = &base.vault_root else {
        return;
    };
    let matched = VaultScanner::new(root.path())
        .use_cache(false)
        .scan_with(|note| {
            if evaluate(&base, &note, view) {
                Decision::Keep(())
            } else {
                Decision::Drop
            }
        });
    match matched {
        Ok(matched) => println!("matches: {}", matched.len()),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

fn indent(text: &str, width: usize) -> String {
    let pad = " ".repeat(width);
    text.lines().map(|line| format!("{pad}{line}")).collect::<Vec<_>>().join("\n")
}

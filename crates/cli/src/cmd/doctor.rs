use std::path::Path;

use vaultdash_core::bases::{BaseConfig, VaultRoot};
use vaultdash_core::config::{default_config_path, ConfigLoader};

pub fn run(config: Option<&Path>, profile: Option<&str>) {
    let rc = match ConfigLoader::load(config, profile) {
        Ok(rc) => rc,
        Err(e) => {
            println!("FAIL vdash doctor");
            println!("{e}");
            if config.is_none() {
                println!("looked for: {}", default_config_path().display());
            }
            std::process::exit(1);
        }
    };
    crate::logging::init(&rc);

    let todo = BaseConfig::load(&rc.todo_base, &rc.vault_marker);
    let project = BaseConfig::load(&rc.project_base, &rc.vault_marker);
    let ok = todo.is_ok() && project.is_ok();

    println!("{} vdash doctor", if ok { "OK  " } else { "FAIL" });
    println!(
        "path: {}",
        config.map_or_else(
            || default_config_path().display().to_string(),
            |p| p.display().to_string()
        )
    );
    println!("profile: {}", rc.active_profile);
    println!("todo_base: {}", rc.todo_base.display());
    print_base(&todo);
    println!("project_base: {}", rc.project_base.display());
    print_base(&project);
    println!("todo_view: {}", rc.todo_view.as_deref().unwrap_or("(none)"));
    println!("project_view: {}", rc.project_view.as_deref().unwrap_or("(none)"));
    println!("max_results: {}", rc.max_results);
    println!("cache.enabled: {}", rc.cache.enabled);
    println!("cache.path: {}", rc.cache.path.display());
    println!("cache.max_age_secs: {}", rc.cache.max_age.as_secs());

    if let (Ok(todo), Ok(project)) = (&todo, &project) {
        let roots = (todo.vault_root.as_ref(), project.vault_root.as_ref());
        if let (Some(a), Some(b)) = roots {
            if a.path() != b.path() {
                println!(
                    "warning: bases resolve to different vaults; \
                     only the todo base's vault is scanned"
                );
            }
        }
    }

    if !ok {
        std::process::exit(1);
    }
}

fn print_base(base: &Result<BaseConfig, vaultdash_core::bases::BaseConfigError>) {
    match base {
        Ok(base) => {
            let filters = &base.filter_set;
            println!("  filters: {} term(s), {}", filters.terms.len(), filters.combine);
            println!("  views: {}", base.views.len());
            match &base.vault_root {
                Some(VaultRoot::Marker(path)) => println!("  vault_root: {}", path.display()),
                Some(VaultRoot::Fallback(path)) => {
                    println!("  vault_root: {} (guessed, no vault marker found)", path.display())
                }
                None => println!("  vault_root: (none)"),
            }
        }
        Err(e) => println!("  error: {e}"),
    }
}

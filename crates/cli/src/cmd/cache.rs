use std::path::Path;

use vaultdash_core::cache::VaultCache;

pub fn clear(config: Option<&Path>, profile: Option<&str>, all: bool) {
    let rc = super::load_config(config, profile);

    if !rc.cache.path.exists() {
        println!("Cache is empty ({} does not exist)", rc.cache.path.display());
        return;
    }
    let cache = match VaultCache::open(&rc.cache.path) {
        Ok(cache) => cache,
        Err(e) => {
            eprintln!("Error opening cache {}: {}", rc.cache.path.display(), e);
            std::process::exit(1);
        }
    };

    let result = if all {
        cache.invalidate_all().map(|n| format!("Cleared {n} cached vault(s)"))
    } else {
        match super::vault_root(&rc) {
            Some(root) => cache.invalidate(&root).map(|removed| {
                if removed {
                    format!("Cleared cached scan of {}", root.display())
                } else {
                    format!("No cached scan for {}", root.display())
                }
            }),
            None => {
                eprintln!("Error: could not locate a vault for {}", rc.todo_base.display());
                std::process::exit(1);
            }
        }
    };

    match result {
        Ok(message) => println!("{message}"),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

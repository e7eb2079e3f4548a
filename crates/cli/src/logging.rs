//! Log setup for `vdash`, driven by the `[logging]` config section.
//!
//! Diagnostics go to stderr so stdout stays clean for tables and `--json`.
//! A `file` entry adds a second, non-blocking sink with its own level.

use std::fs::{self, File};
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use vaultdash_core::config::ResolvedConfig;

/// Flushes the file sink on drop; held until the process exits.
static FILE_GUARD: Mutex<Option<WorkerGuard>> = Mutex::new(None);

/// Install the subscriber. `RUST_LOG` overrides the configured levels.
pub fn init(cfg: &ResolvedConfig) {
    let logging = &cfg.logging;
    let stderr_layer = fmt::layer()
        .with_writer(io::stderr)
        .with_target(false)
        .with_filter(filter_for(&logging.level, LevelFilter::INFO));
    let registry = tracing_subscriber::registry().with(stderr_layer);

    let Some(path) = logging.file.as_deref() else {
        registry.init();
        return;
    };

    let file = match open_log_file(path) {
        Ok(file) => file,
        Err(e) => {
            // Keep going with stderr only; a bad log path should not block a listing
            registry.init();
            tracing::warn!("Cannot write log file {}: {}", path.display(), e);
            return;
        }
    };

    let (writer, guard) = tracing_appender::non_blocking(file);
    if let Ok(mut slot) = FILE_GUARD.lock() {
        *slot = Some(guard);
    }

    let file_level = logging.file_level.as_deref().unwrap_or(&logging.level);
    let file_layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_file(true)
        .with_line_number(true)
        .with_filter(filter_for(file_level, LevelFilter::DEBUG));

    registry.with(file_layer).init();
}

fn filter_for(level: &str, fallback: LevelFilter) -> EnvFilter {
    let level = parse_level(level).unwrap_or(fallback);
    EnvFilter::builder().with_default_directive(level.into()).from_env_lossy()
}

fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    File::create(path)
}

fn parse_level(s: &str) -> Option<LevelFilter> {
    match s.trim().to_ascii_lowercase().as_str() {
        "off" => Some(LevelFilter::OFF),
        "error" => Some(LevelFilter::ERROR),
        "warn" | "warning" => Some(LevelFilter::WARN),
        "info" => Some(LevelFilter::INFO),
        "debug" => Some(LevelFilter::DEBUG),
        "trace" => Some(LevelFilter::TRACE),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn level_names_are_case_insensitive() {
        assert_eq!(parse_level("WARN"), Some(LevelFilter::WARN));
        assert_eq!(parse_level(" warning "), Some(LevelFilter::WARN));
        assert_eq!(parse_level("Off"), Some(LevelFilter::OFF));
        assert_eq!(parse_level("trace"), Some(LevelFilter::TRACE));
        assert_eq!(parse_level("loud"), None);
        assert_eq!(parse_level(""), None);
    }

    #[test]
    fn log_file_parent_is_created() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/logs/vdash.log");
        open_log_file(&path).unwrap();
        assert!(path.exists());
    }
}

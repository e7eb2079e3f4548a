use assert_cmd::prelude::*;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::tempdir;

fn write_config(root: &Path, logging: &str) -> std::path::PathBuf {
    let vault = root.join("Vault");
    fs::create_dir_all(vault.join(".obsidian")).unwrap();
    fs::create_dir_all(vault.join("Bases")).unwrap();
    fs::write(vault.join("Bases/todo.base"), "filters:\n  and:\n    - tags.contains(\"todo\")\n")
        .unwrap();
    fs::write(vault.join("Bases/projects.base"), "filters:\n  and:\n    - tags.contains(\"project\")\n")
        .unwrap();

    let config_path = root.join("config.toml");
    let config_content = format!(
        r#"
version = 1
[profiles.default]
todo_base = "{vault}/Bases/todo.base"
project_base = "{vault}/Bases/projects.base"

[cache]
path = "{root}/cache.db"

{logging}
"#,
        vault = vault.display(),
        root = root.display(),
    );
    fs::write(&config_path, &config_content).unwrap();
    config_path
}

#[test]
fn test_logging_to_file() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    let log_file = root.join("logs/vdash.log");

    let config_path = write_config(
        root,
        &format!("[logging]\nlevel = \"debug\"\nfile = \"{}\"\n", log_file.display()),
    );

    // A scan logs a summary at info level
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("vdash"));
    cmd.arg("--config").arg(&config_path).arg("todos").assert().success();

    assert!(log_file.exists(), "Log file should be created");
}

#[test]
fn test_logging_level_parsing() {
    let dir = tempdir().unwrap();
    let config_path = write_config(dir.path(), "[logging]\nlevel = \"trace\"\n");

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("vdash"));
    cmd.arg("--config").arg(&config_path).arg("doctor").assert().success();
}

#[test]
fn test_logging_split_levels() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    let log_file = root.join("split.log");

    let config_path = write_config(
        root,
        &format!(
            "[logging]\nlevel = \"error\"\nfile_level = \"debug\"\nfile = \"{}\"\n",
            log_file.display()
        ),
    );

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("vdash"));
    let output = cmd.arg("--config").arg(&config_path).arg("todos").output().unwrap();
    assert!(output.status.success());

    // Stderr stays at error level while the file gets the debug output
    assert!(!String::from_utf8_lossy(&output.stderr).contains("INFO"));
    assert!(log_file.exists());
}

#[test]
fn test_unwritable_log_file_falls_back_to_stderr() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    let blocker = root.join("not-a-dir");
    fs::write(&blocker, "").unwrap();

    let config_path = write_config(
        root,
        &format!("[logging]\nfile = \"{}\"\n", blocker.join("vdash.log").display()),
    );

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("vdash"));
    let output = cmd.arg("--config").arg(&config_path).arg("todos").output().unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Cannot write log file"));
}

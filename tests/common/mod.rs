//! Common test utilities for runseq tests

#![allow(dead_code)]

use std::path::PathBuf;
use tempfile::TempDir;

/// Creates an empty scratch project directory
pub fn create_project() -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().to_path_buf();
    (dir, path)
}

/// Creates a scratch project with a runseq config file, returning its path
pub fn create_project_with_config(content: &str) -> (TempDir, PathBuf, PathBuf) {
    let (dir, path) = create_project();
    let config_path = path.join("runseq.toml");
    std::fs::write(&config_path, content).expect("Failed to write config");
    (dir, path, config_path)
}

/// Installs an executable shim under `<project>/node_modules/.bin`
///
/// The shim is a shell script, so these helpers are Unix-only.
#[cfg(unix)]
pub fn install_local_bin(project: &std::path::Path, name: &str, script: &str) {
    use std::os::unix::fs::PermissionsExt;

    let bin_dir = project.join("node_modules").join(".bin");
    std::fs::create_dir_all(&bin_dir).expect("Failed to create .bin dir");

    let shim = bin_dir.join(name);
    std::fs::write(&shim, format!("#!/bin/sh\n{}\n", script)).expect("Failed to write shim");

    let mut perms = std::fs::metadata(&shim)
        .expect("Failed to get metadata")
        .permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&shim, perms).expect("Failed to set permissions");
}

/// The runseq binary under test
pub fn runseq() -> assert_cmd::Command {
    assert_cmd::Command::cargo_bin("runseq").expect("Failed to find runseq binary")
}

/// Sample config with a few tasks
pub const SAMPLE_CONFIG: &str = r#"
[defaults]
quiet = false

[tasks.greet]
commands = ["echo hello from greet"]
description = "Say hello"

[tasks.chain]
commands = ["touch one.txt", "touch two.txt"]

[tasks.failing]
commands = ["touch before.txt", "sh -c 'exit 4'", "touch after.txt"]
"#;

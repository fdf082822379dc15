//! Command-line tokenization and child environment helpers
//!
//! Splits a textual command into program + arguments and builds the
//! search-path extension that lets project-local binaries run without a
//! `node_modules/.bin/` prefix.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Environment variable used to locate executables
pub const SEARCH_PATH_VAR: &str = "PATH";

/// Split a command string into `[program, args...]` tokens
///
/// Uses shell-like word splitting with surrounding quotes stripped from each
/// token. This is not a shell grammar: no operators, pipes, or variable
/// expansion. A malformed quote falls back to plain whitespace splitting
/// rather than rejecting the command.
pub fn split_command(command: &str) -> Vec<String> {
    shell_words::split(command).unwrap_or_else(|_| {
        tracing::debug!(command, "unbalanced quotes; falling back to whitespace split");
        command.split_whitespace().map(|s| s.to_string()).collect()
    })
}

/// Project-local binary directory under a working directory
pub fn local_bin_dir(cwd: &Path) -> PathBuf {
    cwd.join("node_modules").join(".bin")
}

/// Inherited search path extended with the local binary directory
///
/// The inherited value always comes first, so local binaries supplement the
/// system path instead of shadowing it. When the variable is unset the local
/// directory stands alone.
pub fn extended_path(cwd: &Path) -> OsString {
    let bin_dir = local_bin_dir(cwd);

    match std::env::var_os(SEARCH_PATH_VAR) {
        Some(inherited) => {
            let paths = std::env::split_paths(&inherited).chain(std::iter::once(bin_dir));
            match std::env::join_paths(paths) {
                Ok(joined) => joined,
                Err(e) => {
                    tracing::warn!(error = %e, "could not extend search path; leaving it unchanged");
                    inherited
                }
            }
        }
        None => bin_dir.into_os_string(),
    }
}

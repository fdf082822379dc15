//! Single-command execution
//!
//! Runs one textual command line as a child process with:
//! - Shell-like tokenization (quotes stripped, no shell grammar)
//! - Inherited environment plus the extended search path
//! - Caller-supplied environment overrides
//! - Working directory control
//! - Quiet or pass-through standard streams

use std::collections::HashMap;
use std::path::Path;
use std::process::Stdio;

use tokio::process::Command;

use crate::error::RunError;
use crate::executor::command_line::{extended_path, split_command, SEARCH_PATH_VAR};

/// Run a single command to completion
///
/// The command is tokenized into `[program, args...]`; the child runs in
/// `cwd` with the inherited environment, a search path extended with
/// `<cwd>/node_modules/.bin`, and `env` layered on top (a caller-supplied
/// search-path entry wins). Standard input is never connected; standard
/// output and error are suppressed or passed through per `quiet`.
///
/// # Arguments
/// * `command` - The command line to run
/// * `index` - Position of the command in its sequence, for diagnostics
/// * `env` - Variables layered over the inherited environment
/// * `cwd` - Working directory for the child
/// * `quiet` - Suppress the child's stdout/stderr
///
/// # Errors
/// * `RunError::EmptyCommand` - If the command tokenizes to nothing
/// * `RunError::Spawn` - If the child process couldn't be started
/// * `RunError::NonZeroExit` - If the child exited with a non-zero code
pub async fn run_one(
    command: &str,
    index: usize,
    env: &HashMap<String, String>,
    cwd: &Path,
    quiet: bool,
) -> Result<(), RunError> {
    let tokens = split_command(command);
    let (program, args) = match tokens.split_first() {
        Some((program, args)) => (program, args),
        None => return Err(RunError::EmptyCommand { index }),
    };

    let mut cmd = Command::new(program);
    cmd.args(args)
        .current_dir(cwd)
        .env(SEARCH_PATH_VAR, extended_path(cwd))
        .stdin(Stdio::null())
        .kill_on_drop(true); // Kill the child if the future is dropped

    // Caller-supplied variables layer last and may override anything,
    // including the extended search path.
    for (key, value) in env {
        cmd.env(key, value);
    }

    if quiet {
        cmd.stdout(Stdio::null()).stderr(Stdio::null());
    } else {
        cmd.stdout(Stdio::inherit()).stderr(Stdio::inherit());
    }

    tracing::debug!(command, index, cwd = %cwd.display(), quiet, "spawning child");

    let mut child = cmd.spawn().map_err(|source| RunError::Spawn {
        command: command.to_string(),
        index,
        source,
    })?;

    let status = child.wait().await.map_err(RunError::Io)?;
    // code() is None when the child died to a signal
    let code = status.code().unwrap_or(-1);

    tracing::debug!(command, index, exit_code = code, "child exited");

    if code == 0 {
        Ok(())
    } else {
        Err(RunError::NonZeroExit {
            command: command.to_string(),
            index,
            code,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cwd() -> std::path::PathBuf {
        std::env::current_dir().unwrap()
    }

    #[tokio::test]
    async fn test_run_one_success() {
        let result = run_one("sh -c 'exit 0'", 0, &HashMap::new(), &cwd(), true).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_run_one_non_zero_exit() {
        let result = run_one("sh -c 'exit 3'", 1, &HashMap::new(), &cwd(), true).await;

        match result {
            Err(RunError::NonZeroExit { code, index, .. }) => {
                assert_eq!(code, 3);
                assert_eq!(index, 1);
            }
            other => panic!("Expected NonZeroExit, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_run_one_spawn_failure() {
        let result = run_one(
            "definitely-not-a-real-binary-12345",
            0,
            &HashMap::new(),
            &cwd(),
            true,
        )
        .await;

        assert!(matches!(result, Err(RunError::Spawn { .. })));
    }

    #[tokio::test]
    async fn test_run_one_empty_command() {
        let result = run_one("   ", 2, &HashMap::new(), &cwd(), true).await;

        match result {
            Err(RunError::EmptyCommand { index }) => assert_eq!(index, 2),
            other => panic!("Expected EmptyCommand, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_run_one_env_override() {
        let mut env = HashMap::new();
        env.insert("RUNSEQ_TEST_MARKER".to_string(), "hello".to_string());

        let result = run_one(
            r#"sh -c 'test "$RUNSEQ_TEST_MARKER" = hello'"#,
            0,
            &env,
            &cwd(),
            true,
        )
        .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_run_one_runs_in_cwd() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join("marker.txt"), "x").unwrap();

        let result = run_one(
            "sh -c 'test -f marker.txt'",
            0,
            &HashMap::new(),
            dir.path(),
            true,
        )
        .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_run_one_quote_stripping_reaches_child() {
        // The child sees the quoted token without its quotes
        let result = run_one(
            r#"sh -c 'exit 0' "unused arg""#,
            0,
            &HashMap::new(),
            &cwd(),
            true,
        )
        .await;

        assert!(result.is_ok());
    }
}

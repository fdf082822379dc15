//! Sequential command execution
//!
//! Builds the deferred task that runs a command sequence one command at a
//! time, racing each command against the optional timeout. Nothing executes
//! until the returned future is awaited.

use std::collections::HashMap;
use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;

use tokio::time::timeout;

use crate::error::RunError;
use crate::executor::runner::run_one;

/// Options applied uniformly to every command in a sequence
///
/// Resolved once per [`build_task`] call; there is no per-command override.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Suppress the children's stdout/stderr (default: false)
    pub quiet: bool,
    /// Convert any failure of any command into a no-op success (default: false)
    pub ignore_errors: bool,
    /// Working directory, also the root of the local binary directory
    /// (default: the process current directory at task-build time)
    pub cwd: Option<PathBuf>,
    /// Maximum wall-clock time per command (default: none)
    pub timeout: Option<Duration>,
    /// Variables layered over the inherited environment (default: empty)
    pub env: HashMap<String, String>,
}

impl RunOptions {
    /// Create options with a working directory
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            cwd: Some(dir.into()),
            ..Default::default()
        }
    }

    /// Suppress child output
    pub fn quiet(mut self) -> Self {
        self.quiet = true;
        self
    }

    /// Tolerate failures of every kind
    pub fn ignore_errors(mut self) -> Self {
        self.ignore_errors = true;
        self
    }

    /// Set the per-command timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the per-command timeout in milliseconds
    pub fn with_timeout_ms(self, ms: u64) -> Self {
        self.with_timeout(Duration::from_millis(ms))
    }

    /// Add an environment variable
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }
}

/// An ordered sequence of command strings
///
/// A single command converts into a one-element sequence; order is
/// preserved and each entry is tokenized independently at run time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandSeq(Vec<String>);

impl CommandSeq {
    /// Commands in execution order
    pub fn commands(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for CommandSeq {
    fn from(command: &str) -> Self {
        Self(vec![command.to_string()])
    }
}

impl From<String> for CommandSeq {
    fn from(command: String) -> Self {
        Self(vec![command])
    }
}

impl From<Vec<String>> for CommandSeq {
    fn from(commands: Vec<String>) -> Self {
        Self(commands)
    }
}

impl From<Vec<&str>> for CommandSeq {
    fn from(commands: Vec<&str>) -> Self {
        Self(commands.iter().map(|c| c.to_string()).collect())
    }
}

impl From<&[&str]> for CommandSeq {
    fn from(commands: &[&str]) -> Self {
        Self(commands.iter().map(|c| c.to_string()).collect())
    }
}

/// Build the deferred task for a command sequence
///
/// Options are resolved immediately: the working directory is captured and
/// made absolute at build time, so a later ambient directory change cannot
/// affect the task. The returned future runs the commands strictly in
/// order when awaited; no two children of one sequence ever overlap.
///
/// With `ignore_errors` every error kind is swallowed uniformly and the
/// sequence continues; otherwise the first failure stops the sequence and
/// becomes the task's error. When the timeout fires, the runner future is
/// dropped and the child process is killed with it.
///
/// # Examples
///
/// ```no_run
/// use runseq::{build_task, RunOptions};
///
/// # async fn demo() -> Result<(), runseq::RunError> {
/// let task = build_task(
///     vec!["rm -rf build", "tsc --out-dir build"],
///     RunOptions::default().with_timeout_ms(60_000),
/// );
/// task.await
/// # }
/// ```
pub fn build_task(
    commands: impl Into<CommandSeq>,
    options: RunOptions,
) -> impl Future<Output = Result<(), RunError>> {
    let commands = commands.into();
    let RunOptions {
        quiet,
        ignore_errors,
        cwd,
        timeout: per_command_timeout,
        env,
    } = options;

    // Capture the working directory now, not when the task runs.
    let resolved_cwd = resolve_cwd(cwd);

    async move {
        let cwd = resolved_cwd?;

        for (index, command) in commands.0.iter().enumerate() {
            tracing::debug!(index, command = %command, "running command");

            let outcome = match per_command_timeout {
                Some(limit) => {
                    match timeout(limit, run_one(command, index, &env, &cwd, quiet)).await {
                        Ok(outcome) => outcome,
                        // Dropping the runner future kills the child (kill_on_drop)
                        Err(_) => Err(RunError::Timeout {
                            command: command.clone(),
                            index,
                            timeout_ms: limit.as_millis() as u64,
                        }),
                    }
                }
                None => run_one(command, index, &env, &cwd, quiet).await,
            };

            match outcome {
                Ok(()) => {}
                Err(err) if ignore_errors => {
                    tracing::warn!(index, command = %command, error = %err, "ignoring failed command");
                }
                Err(err) => return Err(err),
            }
        }

        Ok(())
    }
}

/// Make the working directory absolute, defaulting to the process cwd
fn resolve_cwd(cwd: Option<PathBuf>) -> Result<PathBuf, RunError> {
    match cwd {
        Some(dir) if dir.is_absolute() => Ok(dir),
        Some(dir) => Ok(std::env::current_dir()?.join(dir)),
        None => Ok(std::env::current_dir()?),
    }
}

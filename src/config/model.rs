//! Configuration model for runseq
//!
//! Defines the structure for XDG-compliant layered configuration: default
//! execution options plus named tasks (ordered command sequences).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::RunError;
use crate::executor::{CommandSeq, RunOptions};

/// Root configuration structure
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Default execution options applied to every run
    #[serde(default)]
    pub defaults: Defaults,

    /// Named tasks: ordered command sequences with optional option overrides
    #[serde(default)]
    pub tasks: HashMap<String, TaskConfig>,
}

/// Default execution options
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Defaults {
    /// Suppress child stdout/stderr
    #[serde(default)]
    pub quiet: bool,

    /// Tolerate failures of every kind
    #[serde(default)]
    pub ignore_errors: bool,

    /// Per-command timeout in milliseconds (absent = no timeout)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,

    /// Working directory for the children (absent = process current dir)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cwd: Option<String>,

    /// Variables layered over the inherited environment
    #[serde(default)]
    pub env: HashMap<String, String>,
}

/// A named task: an ordered command sequence plus option overrides
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct TaskConfig {
    /// Commands run one at a time, in order
    #[serde(default)]
    pub commands: Vec<String>,

    /// Human description shown by `runseq list`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Override the default quiet flag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quiet: Option<bool>,

    /// Override the default ignore_errors flag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ignore_errors: Option<bool>,

    /// Override the default timeout
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,

    /// Override the default working directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cwd: Option<String>,

    /// Task environment, layered over the default environment
    #[serde(default)]
    pub env: HashMap<String, String>,
}

impl Config {
    /// Names of all configured tasks, sorted
    pub fn task_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tasks.keys().cloned().collect();
        names.sort();
        names
    }

    /// Check whether a task is configured
    pub fn has_task(&self, name: &str) -> bool {
        self.tasks.contains_key(name)
    }

    /// Execution options built from `[defaults]` alone
    ///
    /// Used for ad-hoc `exec` runs that are not tied to a named task.
    pub fn default_options(&self) -> RunOptions {
        RunOptions {
            quiet: self.defaults.quiet,
            ignore_errors: self.defaults.ignore_errors,
            cwd: self.defaults.cwd.as_deref().map(expand_dir),
            timeout: self.defaults.timeout_ms.map(Duration::from_millis),
            env: self.defaults.env.clone(),
        }
    }

    /// Resolve a named task into its command sequence and merged options
    ///
    /// Task-level settings override `[defaults]`; the task environment is
    /// layered over the default environment key by key. The result applies
    /// uniformly to every command in the sequence.
    ///
    /// # Errors
    /// * `RunError::TaskNotFound` - If no task with this name is configured
    /// * `RunError::Config` - If the task has an empty command list
    pub fn resolve_task(&self, name: &str) -> Result<(CommandSeq, RunOptions), RunError> {
        let task = self.tasks.get(name).ok_or_else(|| RunError::TaskNotFound {
            task: name.to_string(),
            available: self.task_names(),
        })?;

        if task.commands.is_empty() {
            return Err(RunError::Config(format!(
                "task '{}' has no commands",
                name
            )));
        }

        let mut env = self.defaults.env.clone();
        for (key, value) in &task.env {
            env.insert(key.clone(), value.clone());
        }

        let options = RunOptions {
            quiet: task.quiet.unwrap_or(self.defaults.quiet),
            ignore_errors: task.ignore_errors.unwrap_or(self.defaults.ignore_errors),
            cwd: task
                .cwd
                .as_deref()
                .or(self.defaults.cwd.as_deref())
                .map(expand_dir),
            timeout: task
                .timeout_ms
                .or(self.defaults.timeout_ms)
                .map(Duration::from_millis),
            env,
        };

        Ok((CommandSeq::from(task.commands.clone()), options))
    }
}

/// Expand `~` in a configured directory
fn expand_dir(dir: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(dir).into_owned())
}

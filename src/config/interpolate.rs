//! Configuration value interpolation
//!
//! Supports environment variable and shell command interpolation in config values:
//! - `$VAR` or `${VAR}` - Environment variable substitution
//! - `$(command)` - Shell command execution
//!
//! Applied to configured commands, working directories, and environment
//! values before a task runs. The command strings the sequencer executes are
//! never expanded at run time; only configuration passes through here.
//!
//! # Security Note
//!
//! Shell command execution runs with the current user's permissions.
//! Config files should have restricted permissions (600) to prevent
//! unauthorized command execution.

use once_cell::sync::Lazy;
use regex::Regex;
use std::process::Command;

static CMD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\(([^)]+)\)").expect("Invalid regex"));
static BRACKETED_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("Invalid regex"));
static SIMPLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$([A-Za-z_][A-Za-z0-9_]*)").expect("Invalid regex"));

/// Interpolate a string with environment variables and shell commands
///
/// # Interpolation Syntax
///
/// - `$VAR` - Simple environment variable
/// - `${VAR}` - Environment variable with explicit boundaries
/// - `$(command)` - Shell command execution
///
/// # Examples
///
/// ```
/// use runseq::config::interpolate::interpolate_string;
///
/// std::env::set_var("MY_VAR", "hello");
/// let result = interpolate_string("Value: $MY_VAR");
/// assert_eq!(result, "Value: hello");
/// std::env::remove_var("MY_VAR");
/// ```
pub fn interpolate_string(s: &str) -> String {
    // Shell commands first, so command output is not re-read as variables
    let result = interpolate_commands(s);
    interpolate_env_vars(&result)
}

/// Interpolate shell commands: $(command)
fn interpolate_commands(s: &str) -> String {
    CMD_RE
        .replace_all(s, |caps: &regex::Captures| {
            let cmd = &caps[1];
            match execute_shell_command(cmd) {
                Ok(output) => output,
                Err(e) => {
                    tracing::warn!("Failed to execute config command '{}': {}", cmd, e);
                    // Return original on error so it's visible
                    format!("$({})_ERROR", cmd)
                }
            }
        })
        .to_string()
}

/// Interpolate environment variables: $VAR or ${VAR}
fn interpolate_env_vars(s: &str) -> String {
    // Match ${VAR} first (explicit boundaries)
    let result = BRACKETED_RE
        .replace_all(s, |caps: &regex::Captures| {
            let var = &caps[1];
            std::env::var(var).unwrap_or_else(|_| {
                tracing::debug!("Environment variable '{}' not set", var);
                String::new()
            })
        })
        .to_string();

    // Then match $VAR (simple form)
    SIMPLE_RE
        .replace_all(&result, |caps: &regex::Captures| {
            let var = &caps[1];
            std::env::var(var).unwrap_or_else(|_| {
                tracing::debug!("Environment variable '{}' not set", var);
                String::new()
            })
        })
        .to_string()
}

/// Execute a shell command and return its stdout
fn execute_shell_command(cmd: &str) -> Result<String, std::io::Error> {
    let output = Command::new("sh").arg("-c").arg(cmd).output()?;

    if output.status.success() {
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr);
        Err(std::io::Error::other(format!("Command failed: {}", stderr)))
    }
}

/// Interpolate all string values in a Config
///
/// Applies interpolation to default and per-task working directories and
/// environment values, and to every configured command string.
pub fn interpolate_config(config: &mut super::model::Config) {
    if let Some(ref mut cwd) = config.defaults.cwd {
        *cwd = interpolate_string(cwd);
    }
    for value in config.defaults.env.values_mut() {
        *value = interpolate_string(value);
    }

    for task in config.tasks.values_mut() {
        for command in &mut task.commands {
            *command = interpolate_string(command);
        }
        if let Some(ref mut cwd) = task.cwd {
            *cwd = interpolate_string(cwd);
        }
        for value in task.env.values_mut() {
            *value = interpolate_string(value);
        }
    }
}

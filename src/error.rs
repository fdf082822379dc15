//! Error types for runseq
//!
//! Provides structured error types with suggestions for common issues.

use serde::Serialize;
use thiserror::Error;

/// Main error type for command-sequence execution
#[derive(Error, Debug)]
pub enum RunError {
    /// Command string tokenized to nothing
    #[error("Empty command at position {index}")]
    EmptyCommand { index: usize },

    /// The child process could not be started
    #[error("Failed to spawn command `{command}` (position {index}): {source}")]
    Spawn {
        command: String,
        index: usize,
        #[source]
        source: std::io::Error,
    },

    /// The child process ran and exited with a non-zero status
    #[error("Command `{command}` (position {index}) exited with code {code}")]
    NonZeroExit {
        command: String,
        index: usize,
        code: i32,
    },

    /// The command exceeded the configured timeout
    #[error("Command `{command}` (position {index}) timed out after {timeout_ms}ms")]
    Timeout {
        command: String,
        index: usize,
        timeout_ms: u64,
    },

    /// Requested task not found in configuration
    #[error("Task '{task}' not found")]
    TaskNotFound { task: String, available: Vec<String> },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl RunError {
    /// Exit code carried by the error, if the child ran at all.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            RunError::NonZeroExit { code, .. } => Some(*code),
            _ => None,
        }
    }
}

/// Serializable error info for JSON output
#[derive(Debug, Serialize, Clone)]
pub struct ErrorInfo {
    pub message: String,
    pub error_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub available: Vec<String>,
}

impl From<&RunError> for ErrorInfo {
    fn from(err: &RunError) -> Self {
        match err {
            RunError::EmptyCommand { index } => ErrorInfo {
                message: format!("Empty command at position {}", index),
                error_type: "empty_command".to_string(),
                command: None,
                index: Some(*index),
                exit_code: None,
                suggestion: Some("Remove the blank entry from the command list".to_string()),
                available: vec![],
            },
            RunError::Spawn {
                command,
                index,
                source,
            } => ErrorInfo {
                message: format!("Failed to spawn command `{}`: {}", command, source),
                error_type: "spawn_failed".to_string(),
                command: Some(command.clone()),
                index: Some(*index),
                exit_code: None,
                suggestion: suggest_spawn_fix(command, source),
                available: vec![],
            },
            RunError::NonZeroExit {
                command,
                index,
                code,
            } => ErrorInfo {
                message: format!("Command `{}` exited with code {}", command, code),
                error_type: "non_zero_exit".to_string(),
                command: Some(command.clone()),
                index: Some(*index),
                exit_code: Some(*code),
                suggestion: None,
                available: vec![],
            },
            RunError::Timeout {
                command,
                index,
                timeout_ms,
            } => ErrorInfo {
                message: format!("Command `{}` timed out after {}ms", command, timeout_ms),
                error_type: "timeout".to_string(),
                command: Some(command.clone()),
                index: Some(*index),
                exit_code: None,
                suggestion: Some(
                    "Try increasing the timeout or checking if the command hangs".to_string(),
                ),
                available: vec![],
            },
            RunError::TaskNotFound { task, available } => ErrorInfo {
                message: format!("Task '{}' not found", task),
                error_type: "task_not_found".to_string(),
                command: None,
                index: None,
                exit_code: None,
                suggestion: Some("Run 'runseq list' to see configured tasks".to_string()),
                available: available.clone(),
            },
            RunError::Config(msg) => ErrorInfo {
                message: format!("Configuration error: {}", msg),
                error_type: "config_error".to_string(),
                command: None,
                index: None,
                exit_code: None,
                suggestion: Some("Check your runseq configuration file".to_string()),
                available: vec![],
            },
            RunError::Io(e) => ErrorInfo {
                message: format!("IO error: {}", e),
                error_type: "io_error".to_string(),
                command: None,
                index: None,
                exit_code: None,
                suggestion: None,
                available: vec![],
            },
        }
    }
}

/// Suggest fixes for common spawn failures
///
/// Probes the current search path with `which` to tell "not installed"
/// apart from "installed but not startable".
pub fn suggest_spawn_fix(command: &str, source: &std::io::Error) -> Option<String> {
    use std::io::ErrorKind;

    let program = command.split_whitespace().next()?;

    match source.kind() {
        ErrorKind::NotFound => {
            if which::which(program).is_ok() {
                Some(format!(
                    "'{}' is on PATH but could not be started from the given working directory",
                    program
                ))
            } else {
                Some(format!(
                    "'{}' was not found; install it or add it to node_modules/.bin",
                    program
                ))
            }
        }
        ErrorKind::PermissionDenied => Some(format!(
            "'{}' is not executable; check its permission bits",
            program
        )),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_command_error() {
        let err = RunError::EmptyCommand { index: 2 };
        assert_eq!(err.to_string(), "Empty command at position 2");

        let info = ErrorInfo::from(&err);
        assert_eq!(info.error_type, "empty_command");
        assert_eq!(info.index, Some(2));
    }

    #[test]
    fn test_spawn_error() {
        let err = RunError::Spawn {
            command: "definitely-not-a-real-binary-12345 --version".to_string(),
            index: 0,
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "No such file"),
        };
        assert!(err.to_string().contains("Failed to spawn"));

        let info = ErrorInfo::from(&err);
        assert_eq!(info.error_type, "spawn_failed");
        assert!(info.suggestion.unwrap().contains("was not found"));
    }

    #[test]
    fn test_non_zero_exit_error() {
        let err = RunError::NonZeroExit {
            command: "make build".to_string(),
            index: 1,
            code: 2,
        };
        assert_eq!(
            err.to_string(),
            "Command `make build` (position 1) exited with code 2"
        );
        assert_eq!(err.exit_code(), Some(2));

        let info = ErrorInfo::from(&err);
        assert_eq!(info.exit_code, Some(2));
        assert_eq!(info.command, Some("make build".to_string()));
    }

    #[test]
    fn test_timeout_error() {
        let err = RunError::Timeout {
            command: "sleep 60".to_string(),
            index: 0,
            timeout_ms: 500,
        };
        assert!(err.to_string().contains("timed out"));
        assert!(err.to_string().contains("500ms"));
        assert_eq!(err.exit_code(), None);
    }

    #[test]
    fn test_task_not_found_error() {
        let err = RunError::TaskNotFound {
            task: "deploy".to_string(),
            available: vec!["build".to_string(), "test".to_string()],
        };
        assert_eq!(err.to_string(), "Task 'deploy' not found");

        let info = ErrorInfo::from(&err);
        assert_eq!(info.error_type, "task_not_found");
        assert!(info.available.contains(&"build".to_string()));
    }

    #[test]
    fn test_suggest_spawn_fix_not_found() {
        let source = std::io::Error::new(std::io::ErrorKind::NotFound, "No such file");
        let suggestion = suggest_spawn_fix("no-such-binary-xyz-98765 arg", &source);
        assert!(suggestion.is_some());
        assert!(suggestion.unwrap().contains("no-such-binary-xyz-98765"));
    }

    #[test]
    fn test_suggest_spawn_fix_permission_denied() {
        let source = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let suggestion = suggest_spawn_fix("./run.sh build", &source);
        assert!(suggestion.unwrap().contains("not executable"));
    }

    #[test]
    fn test_suggest_spawn_fix_empty_command() {
        let source = std::io::Error::new(std::io::ErrorKind::NotFound, "No such file");
        assert!(suggest_spawn_fix("", &source).is_none());
    }

    #[test]
    fn test_error_info_serialization() {
        let info = ErrorInfo {
            message: "Test error".to_string(),
            error_type: "test".to_string(),
            command: Some("echo hi".to_string()),
            index: Some(0),
            exit_code: Some(1),
            suggestion: Some("Fix it".to_string()),
            available: vec![],
        };

        let json = serde_json::to_string(&info).unwrap();
        assert!(json.contains("Test error"));
        assert!(json.contains("exit_code"));
        assert!(!json.contains("available"));
    }

    #[test]
    fn test_error_info_skips_empty_fields() {
        let info = ErrorInfo {
            message: "Test".to_string(),
            error_type: "test".to_string(),
            command: None,
            index: None,
            exit_code: None,
            suggestion: None,
            available: vec![],
        };

        let json = serde_json::to_string(&info).unwrap();
        assert!(!json.contains("suggestion"));
        assert!(!json.contains("exit_code"));
        assert!(!json.contains("command"));
    }
}

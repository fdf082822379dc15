//! CLI command definitions using clap
//!
//! Defines all CLI subcommands and their arguments.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::executor::RunOptions;

/// Sequential shell-command runner for build tasks.
///
/// Runs one or more command lines strictly one at a time, resolving
/// project-local binaries (node_modules/.bin) without path prefixes.
/// Sequences can be given ad hoc or named in a layered TOML config.
#[derive(Parser, Debug)]
#[command(name = "runseq")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path (overrides default XDG paths)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run named tasks from configuration, in order
    Run(RunArgs),

    /// Run ad-hoc command lines sequentially
    Exec(ExecArgs),

    /// List configured tasks
    List(ListArgs),

    /// Show the resolved configuration
    Config(ConfigArgs),
}

/// Execution options shared by `run` and `exec`
///
/// Every flag layers over whatever the configuration resolved; an absent
/// flag leaves the configured value in place.
#[derive(Args, Debug, Default)]
pub struct ExecutionFlags {
    /// Suppress all output from the commands
    #[arg(short, long)]
    pub quiet: bool,

    /// Continue the sequence when a command fails
    #[arg(long)]
    pub ignore_errors: bool,

    /// Per-command timeout in milliseconds (0 disables)
    #[arg(short, long)]
    pub timeout: Option<u64>,

    /// Working directory for the commands
    #[arg(long)]
    pub cwd: Option<PathBuf>,

    /// Environment variables in KEY=VALUE format
    #[arg(short = 'e', long = "env", value_parser = parse_key_value)]
    pub env: Vec<(String, String)>,
}

impl ExecutionFlags {
    /// Layer these flags over options resolved from configuration
    pub fn apply(&self, mut options: RunOptions) -> RunOptions {
        if self.quiet {
            options.quiet = true;
        }
        if self.ignore_errors {
            options.ignore_errors = true;
        }
        if let Some(ms) = self.timeout {
            options.timeout = (ms > 0).then(|| Duration::from_millis(ms));
        }
        if let Some(ref dir) = self.cwd {
            options.cwd = Some(dir.clone());
        }
        for (key, value) in &self.env {
            options.env.insert(key.clone(), value.clone());
        }
        options
    }

    /// Convert the env flags to a map
    pub fn env_as_map(&self) -> HashMap<String, String> {
        self.env.iter().cloned().collect()
    }
}

/// Arguments for the `run` subcommand
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Task names to run, in order
    #[arg(required = true)]
    pub tasks: Vec<String>,

    #[command(flatten)]
    pub flags: ExecutionFlags,
}

/// Arguments for the `exec` subcommand
#[derive(Parser, Debug)]
pub struct ExecArgs {
    /// Command lines to run, one at a time
    #[arg(required = true)]
    pub commands: Vec<String>,

    #[command(flatten)]
    pub flags: ExecutionFlags,
}

/// Parse KEY=VALUE argument
fn parse_key_value(s: &str) -> Result<(String, String), String> {
    let pos = s
        .find('=')
        .ok_or_else(|| format!("invalid argument '{}': expected KEY=VALUE format", s))?;
    Ok((s[..pos].to_string(), s[pos + 1..].to_string()))
}

/// Arguments for the `list` subcommand
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

/// Output format options
#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    Table,
    /// JSON output
    Json,
    /// Plain text (one entry per line)
    Plain,
}

/// Arguments for the `config` subcommand
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Skip $VAR / $(command) interpolation
    #[arg(long)]
    pub raw: bool,
}

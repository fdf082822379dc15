//! CLI module for runseq
//!
//! Provides command-line interface with the following subcommands:
//! - `run` - Run named tasks from configuration
//! - `exec` - Run ad-hoc command lines sequentially
//! - `list` - List configured tasks
//! - `config` - Show the resolved configuration

pub mod commands;

pub use commands::{Cli, Commands};

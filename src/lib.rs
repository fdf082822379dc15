//! runseq - Sequential Shell-Command Runner for Build Tasks
//!
//! Runs one or more shell command lines strictly one at a time, the way
//! build-tool task actions do:
//!
//! - **Deferred tasks** - [`build_task`] returns a lazy future; nothing runs
//!   until it is awaited, so it can be registered inside an external
//!   task-graph runner
//! - **Local binaries** - the child's search path is extended with
//!   `<cwd>/node_modules/.bin`, so project-local tools run without a prefix
//! - **Per-command timeouts** - a command that overruns is failed and its
//!   process killed
//! - **Tolerated failures** - `ignore_errors` turns any failure into a
//!   no-op success
//! - **Layered configuration** - named tasks and default options from
//!   XDG-layered TOML files with `$VAR` / `$(command)` interpolation
//!
//! ## Example
//!
//! ```no_run
//! use runseq::{build_task, RunOptions};
//!
//! # async fn demo() -> Result<(), runseq::RunError> {
//! let clean = build_task("rm -rf build", RunOptions::default());
//! clean.await?;
//!
//! let build = build_task(
//!     vec!["babel index.js --out-file index.es5.js"],
//!     RunOptions::default().with_env("NODE_ENV", "production"),
//! );
//! build.await
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod executor;
pub mod logging;

pub use cli::{Cli, Commands};
pub use config::{load_config, Config};
pub use error::{ErrorInfo, RunError};
pub use executor::{build_task, run_one, CommandSeq, RunOptions};

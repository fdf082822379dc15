//! Logging setup using `tracing` + `tracing-subscriber`.
//!
//! Priority for determining the log filter:
//! 1. `RUNSEQ_LOG` environment variable (e.g. "info", "runseq=debug")
//! 2. `RUST_LOG` environment variable
//! 3. default: `warn` (`debug` with `--verbose`)
//!
//! Logs go to stderr so they never interleave with child stdout.

use tracing_subscriber::EnvFilter;

/// Initialise the global logging subscriber.
///
/// Call once at startup; a second call panics.
pub fn init_logging(verbose: bool) {
    let default_directive = if verbose { "debug" } else { "warn" };

    let filter = std::env::var("RUNSEQ_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .map(EnvFilter::new)
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

//! runseq CLI entry point
//!
//! Usage:
//!   runseq run <task>...       Run configured tasks in order
//!   runseq exec <command>...   Run ad-hoc command lines sequentially
//!   runseq list                List configured tasks
//!   runseq config              Show the resolved configuration

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;

use runseq::cli::commands::{ConfigArgs, ExecArgs, ListArgs, OutputFormat, RunArgs};
use runseq::cli::{Cli, Commands};
use runseq::config::{interpolate_config, load_config, Config};
use runseq::error::{ErrorInfo, RunError};
use runseq::executor::build_task;
use runseq::logging::init_logging;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {:#}", "error".red().bold(), e);
            if let Some(run_err) = e.downcast_ref::<RunError>() {
                if let Some(suggestion) = ErrorInfo::from(run_err).suggestion {
                    eprintln!("{}: {}", "hint".yellow(), suggestion);
                }
            }
            ExitCode::from(process_exit_code(&e))
        }
    }
}

/// Map a failure to the process exit code
///
/// A child's non-zero exit code is propagated; everything else exits 1.
fn process_exit_code(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<RunError>().and_then(RunError::exit_code) {
        Some(code) if (1..=255).contains(&code) => code as u8,
        _ => 1,
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Run(args) => run_tasks(args, cli.config.as_deref(), cli.verbose).await,
        Commands::Exec(args) => exec_commands(args, cli.config.as_deref(), cli.verbose).await,
        Commands::List(args) => list_tasks(args, cli.config.as_deref()),
        Commands::Config(args) => show_config(args, cli.config.as_deref()),
    }
}

/// Load configuration and apply interpolation
fn load_resolved_config(config_path: Option<&str>) -> Result<Config> {
    let mut config = load_config(config_path)?;
    interpolate_config(&mut config);
    Ok(config)
}

/// Run named tasks from configuration, strictly in order
async fn run_tasks(args: RunArgs, config_path: Option<&str>, verbose: bool) -> Result<()> {
    let config = load_resolved_config(config_path)?;

    for name in &args.tasks {
        let (commands, options) = config.resolve_task(name)?;
        let options = args.flags.apply(options);

        if verbose {
            eprintln!(
                "{}: {} ({} command(s))",
                "task".cyan(),
                name,
                commands.len()
            );
        }

        build_task(commands, options).await?;

        if verbose {
            eprintln!("{}: {}", "done".green(), name);
        }
    }

    Ok(())
}

/// Run ad-hoc command lines sequentially
async fn exec_commands(args: ExecArgs, config_path: Option<&str>, verbose: bool) -> Result<()> {
    let config = load_resolved_config(config_path)?;
    let options = args.flags.apply(config.default_options());

    if verbose {
        eprintln!("{}: {} command(s)", "exec".cyan(), args.commands.len());
    }

    build_task(args.commands.clone(), options).await?;
    Ok(())
}

/// List configured tasks
fn list_tasks(args: ListArgs, config_path: Option<&str>) -> Result<()> {
    let config = load_resolved_config(config_path)?;
    let names = config.task_names();

    match args.format {
        OutputFormat::Json => {
            let tasks: Vec<_> = names
                .iter()
                .map(|name| {
                    let task = &config.tasks[name];
                    serde_json::json!({
                        "name": name,
                        "description": task.description.clone(),
                        "commands": task.commands.clone(),
                    })
                })
                .collect();
            let json = serde_json::to_string_pretty(&serde_json::json!({ "tasks": tasks }))?;
            println!("{}", json);
        }
        OutputFormat::Plain => {
            for name in &names {
                println!("{}", name);
            }
        }
        OutputFormat::Table => {
            if names.is_empty() {
                println!("No tasks configured.");
            } else {
                let max_name_width = names.iter().map(|n| n.len()).max().unwrap_or(10);

                for name in &names {
                    let task = &config.tasks[name];
                    let desc = task
                        .description
                        .as_ref()
                        .map(|d| format!("- {}", d))
                        .unwrap_or_else(|| format!("({} command(s))", task.commands.len()));
                    println!(
                        "  {:width$}  {}",
                        name.green(),
                        desc,
                        width = max_name_width
                    );
                }
            }
        }
    }

    Ok(())
}

/// Show the resolved configuration
fn show_config(args: ConfigArgs, config_path: Option<&str>) -> Result<()> {
    let config = if args.raw {
        load_config(config_path)?
    } else {
        load_resolved_config(config_path)?
    };

    match args.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        OutputFormat::Table | OutputFormat::Plain => {
            print!("{}", toml::to_string_pretty(&config)?);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_exit_code_propagates_child_code() {
        let err = anyhow::Error::new(RunError::NonZeroExit {
            command: "sh -c 'exit 7'".to_string(),
            index: 0,
            code: 7,
        });
        assert_eq!(process_exit_code(&err), 7);
    }

    #[test]
    fn test_process_exit_code_out_of_range_is_one() {
        let err = anyhow::Error::new(RunError::NonZeroExit {
            command: "killed".to_string(),
            index: 0,
            code: -1,
        });
        assert_eq!(process_exit_code(&err), 1);
    }

    #[test]
    fn test_process_exit_code_other_errors_are_one() {
        let err = anyhow::Error::new(RunError::Timeout {
            command: "sleep 60".to_string(),
            index: 0,
            timeout_ms: 50,
        });
        assert_eq!(process_exit_code(&err), 1);

        let err = anyhow::anyhow!("unrelated");
        assert_eq!(process_exit_code(&err), 1);
    }
}

//! csvtidy command-line interface.

use std::process::ExitCode;

use clap::Parser;
use csvtidy_cli::logging::init_logging;
use serde::Serialize;

mod cli;
mod commands;
mod summary;

use crate::cli::{Cli, Command};
use crate::commands::{run_batch_command, run_clean, run_detect};
use crate::summary::{print_batch_summary, print_configuration, print_outcome};

fn main() -> ExitCode {
    let cli = Cli::parse();
    cli.color.write_global();
    if let Err(error) = init_logging(&cli.log_config()) {
        eprintln!("error: failed to initialize logging: {error:#}");
        return ExitCode::FAILURE;
    }
    if dispatch(cli.command) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Runs one subcommand; `false` means exit status 1.
fn dispatch(command: Command) -> bool {
    match command {
        Command::Clean(args) => {
            let outcome = run_clean(&args);
            let printed = if args.json {
                print_json(&outcome)
            } else {
                print_outcome(&outcome);
                true
            };
            printed && outcome.success
        }
        Command::Detect(args) => match run_detect(&args) {
            Ok(config) if args.json => print_json(&config),
            Ok(config) => {
                print_configuration(&config);
                true
            }
            Err(error) => {
                eprintln!("error: {error:#}");
                false
            }
        },
        Command::Batch(args) => match run_batch_command(&args) {
            Ok(entries) => {
                print_batch_summary(&entries);
                entries.iter().all(|entry| entry.success)
            }
            Err(error) => {
                eprintln!("error: {error:#}");
                false
            }
        },
    }
}

fn print_json<T: Serialize>(value: &T) -> bool {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{json}");
            true
        }
        Err(error) => {
            eprintln!("error: failed to serialize output: {error}");
            false
        }
    }
}

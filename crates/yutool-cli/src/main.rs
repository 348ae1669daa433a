//! yutool CLI.

use clap::Parser;
use yutool_cli::logging::{LogConfig, init_logging};

mod cli;
mod commands;
mod summary;

use crate::cli::{Cli, Command};
use crate::commands::{run_export_command, run_inspect_command};
use crate::summary::{print_inspect, print_summary};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = LogConfig::default()
        .with_level(cli.requested_level())
        .with_output(cli.log_format.into(), cli.log_file.clone(), cli.color.color);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match &cli.command {
        Command::Export(args) => match run_export_command(args) {
            Ok(result) => {
                print_summary(&result);
                0
            }
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
        Command::Inspect(args) => match run_inspect_command(args) {
            Ok(report) => {
                print_inspect(&report);
                0
            }
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
    };
    std::process::exit(exit_code);
}

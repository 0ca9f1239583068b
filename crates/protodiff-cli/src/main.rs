//! protodiff CLI
//!
//! Backward-compatibility gate for protobuf schemas.
//!
//! Exit status: 0 when no breaking change was found, 1 when at least one
//! was, 2 on any other failure. Invoked without a subcommand (the way
//! `protoc` runs plugins) it acts as the echo capture plugin.

use clap::{Parser, Subcommand};

use protodiff_core::logging_facility::{self, Profile};
use protodiff_core::Report;

mod commands;
mod config;

#[derive(Debug, Parser)]
#[command(name = "protodiff")]
#[command(about = "protodiff - Protobuf schema compatibility checker", long_about = None)]
struct Cli {
    /// Logging profile (quiet, development, production)
    #[arg(long, global = true, env = "PROTODIFF_LOG")]
    log: Option<Profile>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Compare the schema at two source-control revisions
    Diff(commands::diff::DiffArgs),
    /// Compare two previously captured schema artifacts
    Compare(commands::compare::CompareArgs),
    /// Run as the protoc capture plugin (stdin to stdout)
    Echo,
}

/// Exit status for a finished comparison
fn verdict(report: &Report) -> i32 {
    if report.is_empty() {
        0
    } else {
        1
    }
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Diff(args)) => commands::diff::execute(args, cli.log).map(|r| verdict(&r)),
        Some(Commands::Compare(args)) => {
            commands::compare::execute(args, cli.log).map(|r| verdict(&r))
        }
        Some(Commands::Echo) | None => {
            logging_facility::init(cli.log.unwrap_or(Profile::Quiet));
            commands::echo::execute().map(|_| 0)
        }
    };

    match result {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    }
}

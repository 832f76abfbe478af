mod cmd;

use std::fmt;

use clap::{Parser, Subcommand};
use thiserror::Error;
use warehouse_abi::config::Config;

#[derive(Parser)]
#[command(author, version)]
#[command(about = "Publish the warehouse and token contract interfaces")]
struct Cli {
    #[command(flatten)]
    config: Config,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve every tracked contract and summarize its interface
    Check(cmd::Check),
    /// List the functions, events and errors of a contract
    Inspect(cmd::Inspect),
    /// Write the interfaces as JSON files for the frontend bundle
    Export(cmd::Export),
}

/// Represents an error that can occur while running the CLI tool
#[derive(Error, Debug)]
enum CliError {
    /// Error related to the check command
    CheckError(cmd::check::RegistryError),
    /// Error related to the inspect command
    InspectError(cmd::inspect::InspectError),
    /// Error related to the export command
    ExportError(cmd::export::ExportError),
    /// No command was given
    Never,
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CliError::CheckError(err) => write!(f, "Check error: {}", err),
            CliError::InspectError(err) => write!(f, "Inspect error: {}", err),
            CliError::ExportError(err) => write!(f, "Export error: {}", err),
            CliError::Never => write!(
                f,
                "No command given, run with --help to see the available commands"
            ),
        }
    }
}

fn main() -> Result<(), CliError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match &cli.command {
        Some(Commands::Check(check)) => check.run(&cli.config).map_err(CliError::CheckError),
        Some(Commands::Inspect(inspect)) => {
            inspect.run(&cli.config).map_err(CliError::InspectError)
        }
        Some(Commands::Export(export)) => export.run(&cli.config).map_err(CliError::ExportError),
        None => Err(CliError::Never),
    }
}

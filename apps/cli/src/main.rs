use ccu::cli::Cli;
use ccu::commands;
use ccu::error::CliError;
use ccu::logger::{default_level, initialize as LoggerInitialize};

use std::fs::create_dir_all;
use std::process::ExitCode;

use clap::Parser;
use log::{LevelFilter, debug};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = setup_logging(&cli) {
        eprintln!("{e}");
        return ExitCode::FAILURE;
    }

    debug!("{cli:?}");

    match commands::execute(cli).await {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn setup_logging(cli: &Cli) -> Result<(), CliError> {
    if let Some(log_dir) = &cli.log_dir {
        create_dir_all(log_dir).map_err(|e| {
            CliError::cli(format!(
                "Failed to create log directory {}: {e}",
                log_dir.display()
            ))
        })?;
    }

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        default_level()
    };

    LoggerInitialize(cli.log_dir.as_deref(), level)
}

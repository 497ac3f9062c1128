//! catalog-export binary
//!
//! Exit codes: 0 when the run completes (entity-level rejections included), 1 on
//! a fatal failure or invalid arguments. Ctrl-C terminates the process through the
//! default SIGINT handler, which the shell reports as 130.

use std::process::ExitCode;

use clap::Parser;

use catalog_export::cli::commands::{handle_export, handle_test_connection};
use catalog_export::cli::{Args, CliError, Settings, logging};

fn run(args: Args) -> Result<bool, CliError> {
    let settings = Settings::from_args(&args)?;
    logging::init(settings.debug, settings.log_file.as_deref())?;

    if settings.test_connection {
        return handle_test_connection(&settings);
    }

    let report = handle_export(&settings)?;
    Ok(report.success)
}

fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();

    match run(args) {
        Ok(true) => Ok(ExitCode::SUCCESS),
        Ok(false) => Ok(ExitCode::FAILURE),
        Err(e) => {
            eprintln!("Error: {}", e.user_message());
            Ok(ExitCode::FAILURE)
        }
    }
}

//! Remove command implementation.

use crate::formatters::format_output;
use crate::orchestrator::Orchestrator;
use anyhow::{Context, Result};
use proxygen_core::GenerateOptions;
use proxygen_core::cli::{ExitCode, OutputFormat};

/// Runs the remove command.
///
/// Deletes the output folder. No model is fetched.
///
/// # Errors
///
/// Returns an error if the working directory or folder option is invalid,
/// or the folder cannot be deleted.
pub fn run(options: GenerateOptions, output_format: OutputFormat) -> Result<ExitCode> {
    let mut orchestrator = Orchestrator::new(options)?;
    let summary = orchestrator
        .remove()
        .context("failed to remove client proxies")?;

    println!("{}", format_output(&summary, output_format)?);
    Ok(ExitCode::SUCCESS)
}

//! Generate command implementation.
//!
//! Fetches the API description model, writes client proxies under the
//! output folder and stores the audit copy of the model next to them.

use super::common::build_fetcher;
use crate::formatters::format_output;
use crate::orchestrator::Orchestrator;
use anyhow::{Context, Result};
use proxygen_core::GenerateOptions;
use proxygen_core::cli::{ExitCode, OutputFormat};
use tracing::info;

/// Runs the generate command.
///
/// Pre-flight checks run before the model source is contacted.
///
/// # Errors
///
/// Returns an error if:
/// - the working directory or folder option is invalid
/// - no model source is configured or it cannot be read
/// - the module is not part of the model
/// - a file cannot be written
pub async fn run(options: GenerateOptions, output_format: OutputFormat) -> Result<ExitCode> {
    let mut orchestrator = Orchestrator::new(options)?;
    let fetcher = build_fetcher(orchestrator.options())?;

    let summary = orchestrator
        .generate(fetcher.as_ref())
        .await
        .with_context(|| {
            format!(
                "failed to generate client proxies for module '{}'",
                orchestrator.options().module
            )
        })?;

    info!(
        "Generated {} controllers and {} data types into {}",
        summary.controllers, summary.dtos, summary.output
    );
    println!("{}", format_output(&summary, output_format)?);

    Ok(ExitCode::SUCCESS)
}

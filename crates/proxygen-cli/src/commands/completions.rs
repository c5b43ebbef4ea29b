//! Shell completion generation command.

use clap::Command;
use clap_complete::{Shell, generate};
use proxygen_core::cli::ExitCode;
use std::io;
use tracing::info;

/// Writes the completion script for `shell` to `out`.
pub fn write_completions(shell: Shell, cmd: &mut Command, out: &mut dyn io::Write) {
    let name = cmd.get_name().to_string();
    generate(shell, cmd, name, out);
}

/// Runs the completions command, printing the script to stdout.
#[must_use]
pub fn run(shell: Shell, cmd: &mut Command) -> ExitCode {
    info!("Generating {shell} completions");
    write_completions(shell, cmd, &mut io::stdout());
    ExitCode::SUCCESS
}

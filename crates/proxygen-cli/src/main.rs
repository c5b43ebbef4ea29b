//! Proxygen CLI.
//!
//! Generates C# client proxies for the services described by an API
//! description model, and removes them again.
//!
//! # Examples
//!
//! ```bash
//! # Generate proxies for the `app` module of a running service
//! proxygen generate -d src/Acme.BookStore.HttpApi.Client -u https://localhost:44300
//!
//! # Regenerate from the audit copy of a previous run
//! proxygen generate -d . --model-file ClientProxies/app-generate-proxy.json
//!
//! # Delete the generated folder
//! proxygen remove -d src/Acme.BookStore.HttpApi.Client
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use proxygen_cli::commands;
use proxygen_cli::commands::common::exit_code_for;
use proxygen_core::cli::{ExitCode, OutputFormat};
use proxygen_core::{DEFAULT_MODULE, GenerateOptions};
use std::path::PathBuf;
use tracing::error;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Proxygen - C# client proxy generator.
///
/// Reads the API description a service publishes and writes proxy classes,
/// service interfaces and data-transfer types for calling it from C#.
#[derive(Parser, Debug)]
#[command(name = "proxygen")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (json, text, pretty)
    #[arg(long = "format", global = true, default_value = "pretty")]
    format: String,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate client proxies.
    ///
    /// The user-editable `<Controller>ClientProxy.cs` files are created once
    /// and never overwritten; everything else is regenerated.
    Generate {
        /// Directory of the client project (must contain a .csproj file)
        #[arg(short = 'd', long = "working-directory", default_value = ".")]
        working_directory: PathBuf,

        /// Module to generate proxies for
        #[arg(short, long, env = "PROXYGEN_MODULE", default_value = DEFAULT_MODULE)]
        module: String,

        /// Base URL of the remote service
        #[arg(short, long, env = "PROXYGEN_URL", required_unless_present = "model_file")]
        url: Option<String>,

        /// Read the model from a saved JSON document instead of the service
        #[arg(long)]
        model_file: Option<PathBuf>,

        /// Output folder inside the working directory (flat layout)
        #[arg(short, long)]
        folder: Option<String>,

        /// Skip service interfaces and data-transfer types
        #[arg(long)]
        without_contracts: bool,
    },

    /// Remove generated client proxies.
    ///
    /// Deletes the output folder. Nothing is fetched.
    Remove {
        /// Directory of the client project (must contain a .csproj file)
        #[arg(short = 'd', long = "working-directory", default_value = ".")]
        working_directory: PathBuf,

        /// Output folder inside the working directory
        #[arg(short, long)]
        folder: Option<String>,
    },

    /// Generate shell completions.
    Completions {
        /// Target shell for completion generation
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let output_format = cli
        .format
        .parse::<OutputFormat>()
        .map_err(|e| anyhow::anyhow!("{e}"))?;

    let exit_code = match execute_command(cli.command, output_format).await {
        Ok(code) => code,
        Err(err) => {
            error!("{err:#}");
            exit_code_for(&err)
        }
    };

    std::process::exit(exit_code.as_i32());
}

/// Initializes logging.
///
/// `--verbose` forces debug level, otherwise `RUST_LOG` applies with an
/// `info` fallback. Logs go to stderr so stdout carries only the result.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Routes a command to its handler.
async fn execute_command(command: Commands, output_format: OutputFormat) -> Result<ExitCode> {
    match command {
        Commands::Generate {
            working_directory,
            module,
            url,
            model_file,
            folder,
            without_contracts,
        } => {
            let mut builder = GenerateOptions::builder(working_directory)
                .module(module)
                .without_contracts(without_contracts);
            if let Some(url) = url {
                builder = builder.url(url);
            }
            if let Some(path) = model_file {
                builder = builder.model_file(path);
            }
            if let Some(folder) = folder {
                builder = builder.folder(folder);
            }
            commands::generate::run(builder.build(), output_format).await
        }
        Commands::Remove {
            working_directory,
            folder,
        } => {
            let mut builder = GenerateOptions::builder(working_directory);
            if let Some(folder) = folder {
                builder = builder.folder(folder);
            }
            commands::remove::run(builder.build(), output_format)
        }
        Commands::Completions { shell } => {
            use clap::CommandFactory;
            let mut cmd = Cli::command();
            Ok(commands::completions::run(shell, &mut cmd))
        }
    }
}

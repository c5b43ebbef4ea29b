//! Helpers shared by commands.

use anyhow::Result;
use proxygen_core::cli::ExitCode;
use proxygen_core::{Error, GenerateOptions};
use proxygen_introspector::{FileModelFetcher, HttpModelFetcher, ModelFetcher};

/// Picks the model source for a run.
///
/// A saved model file wins over a URL.
///
/// # Errors
///
/// Returns a usage error if neither source is configured, or an error if
/// the HTTP client cannot be created.
pub fn build_fetcher(options: &GenerateOptions) -> Result<Box<dyn ModelFetcher>> {
    if let Some(path) = &options.model_file {
        return Ok(Box::new(FileModelFetcher::new(path)));
    }
    if let Some(url) = &options.url {
        return Ok(Box::new(HttpModelFetcher::new(url.as_str())?));
    }
    Err(Error::usage("Either a remote service URL or a model file is required.").into())
}

/// Maps a command failure to the process exit code.
///
/// The first [`proxygen_core::Error`] in the cause chain decides; anything
/// else is a general error.
///
/// # Examples
///
/// ```
/// use anyhow::Context;
/// use proxygen_cli::commands::common::exit_code_for;
/// use proxygen_core::Error;
/// use proxygen_core::cli::ExitCode;
///
/// let err = Err::<(), _>(Error::usage("No project file(csproj) found in the directory."))
///     .context("generate failed")
///     .unwrap_err();
/// assert_eq!(exit_code_for(&err), ExitCode::USAGE_ERROR);
/// ```
#[must_use]
pub fn exit_code_for(error: &anyhow::Error) -> ExitCode {
    error
        .chain()
        .find_map(|cause| cause.downcast_ref::<Error>())
        .map_or(ExitCode::ERROR, ExitCode::for_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use std::path::PathBuf;

    #[test]
    fn test_build_fetcher_prefers_model_file() {
        let options = GenerateOptions::builder("/work")
            .url("https://localhost:44300")
            .model_file("/work/app-generate-proxy.json")
            .build();

        let fetcher = build_fetcher(&options).unwrap();
        assert_eq!(
            fetcher.location(),
            PathBuf::from("/work/app-generate-proxy.json").display().to_string()
        );
    }

    #[test]
    fn test_build_fetcher_url() {
        let options = GenerateOptions::builder("/work")
            .url("https://localhost:44300")
            .build();

        let fetcher = build_fetcher(&options).unwrap();
        assert_eq!(fetcher.location(), "https://localhost:44300");
    }

    #[test]
    fn test_build_fetcher_without_source() {
        let options = GenerateOptions::builder("/work").build();
        let err = build_fetcher(&options).err().unwrap();
        assert_eq!(exit_code_for(&err), ExitCode::USAGE_ERROR);
    }

    #[test]
    fn test_exit_code_for_fetch_error() {
        let err = anyhow::Error::new(Error::FetchError {
            location: "https://localhost".to_string(),
            source: "connection refused".into(),
        });
        assert_eq!(exit_code_for(&err), ExitCode::FETCH_ERROR);
    }

    #[test]
    fn test_exit_code_for_foreign_error() {
        assert_eq!(exit_code_for(&anyhow!("boom")), ExitCode::ERROR);
    }
}

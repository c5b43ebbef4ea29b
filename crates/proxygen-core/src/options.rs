//! Options for a generation or removal run.
//!
//! A run targets a working directory holding a C# project. Generated files
//! land under an output folder inside it, `ClientProxies` unless a folder
//! is given explicitly.
//!
//! # Examples
//!
//! ```
//! use proxygen_core::GenerateOptions;
//!
//! let options = GenerateOptions::builder("/src/Acme.BookStore.HttpApi.Client")
//!     .module("bookstore")
//!     .url("https://localhost:44300")
//!     .build();
//!
//! assert_eq!(options.module, "bookstore");
//! assert!(options.uses_default_folder());
//! assert!(options.output_root().ends_with("ClientProxies"));
//! ```

use crate::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Folder generated files are written to when no folder is given.
pub const DEFAULT_PROXY_DIRECTORY: &str = "ClientProxies";

/// Module requested when no module is given.
pub const DEFAULT_MODULE: &str = "app";

/// Project marker a working directory must contain.
const PROJECT_FILE_EXTENSION: &str = "csproj";

/// Options controlling a single run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Directory of the C# project receiving the proxies.
    pub work_directory: PathBuf,

    /// Module whose controllers are generated.
    ///
    /// Default: `app`
    pub module: String,

    /// Base URL of the remote service publishing the API description.
    pub url: Option<String>,

    /// Saved API description document used instead of `url`.
    pub model_file: Option<PathBuf>,

    /// Output folder relative to the working directory.
    ///
    /// When `None`, files go to `ClientProxies/<namespace path>/`.
    /// When set, every file is written flat into this folder.
    pub folder: Option<String>,

    /// Skip interface and data-transfer type generation.
    ///
    /// Also requests the model without type definitions.
    /// Default: false
    pub without_contracts: bool,
}

impl GenerateOptions {
    /// Creates a builder for the given working directory.
    #[must_use]
    pub fn builder(work_directory: impl Into<PathBuf>) -> GenerateOptionsBuilder {
        GenerateOptionsBuilder::new(work_directory)
    }

    /// Returns the explicit output folder, ignoring blank values.
    #[must_use]
    pub fn folder(&self) -> Option<&str> {
        self.folder
            .as_deref()
            .map(str::trim)
            .filter(|folder| !folder.is_empty())
    }

    /// Returns `true` when files are laid out under `ClientProxies`.
    #[must_use]
    pub fn uses_default_folder(&self) -> bool {
        self.folder().is_none()
    }

    /// Returns the absolute output root.
    #[must_use]
    pub fn output_root(&self) -> PathBuf {
        self.work_directory
            .join(self.folder().unwrap_or(DEFAULT_PROXY_DIRECTORY))
    }

    /// Returns the path of the audit copy of the fetched model.
    ///
    /// # Examples
    ///
    /// ```
    /// use proxygen_core::GenerateOptions;
    /// use std::path::Path;
    ///
    /// let options = GenerateOptions::builder("/work").module("identity").build();
    /// assert_eq!(
    ///     options.artifact_path(),
    ///     Path::new("/work/ClientProxies/identity-generate-proxy.json")
    /// );
    /// ```
    #[must_use]
    pub fn artifact_path(&self) -> PathBuf {
        self.output_root()
            .join(format!("{}-generate-proxy.json", self.module))
    }

    /// Formats `path` relative to the working directory for log output.
    #[must_use]
    pub fn display_path(&self, path: &Path) -> String {
        path.strip_prefix(&self.work_directory)
            .unwrap_or(path)
            .display()
            .to_string()
    }

    /// Runs the pre-flight checks.
    ///
    /// Must pass before any file is touched.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UsageError`] if:
    /// - the working directory does not exist
    /// - the working directory contains no `*.csproj` file
    /// - the folder option carries a file extension
    pub fn validate(&self) -> Result<()> {
        check_work_directory(&self.work_directory)?;
        check_folder(self.folder())
    }
}

fn check_work_directory(directory: &Path) -> Result<()> {
    if !directory.is_dir() {
        return Err(Error::usage("Specified directory does not exist."));
    }

    let entries = fs::read_dir(directory).map_err(|e| Error::io(directory, e))?;
    let has_project_file = entries.filter_map(std::result::Result::ok).any(|entry| {
        let path = entry.path();
        path.is_file()
            && path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case(PROJECT_FILE_EXTENSION))
    });

    if !has_project_file {
        return Err(Error::usage(
            "No project file(csproj) found in the directory.",
        ));
    }

    Ok(())
}

fn check_folder(folder: Option<&str>) -> Result<()> {
    if folder.is_some_and(|folder| Path::new(folder).extension().is_some()) {
        return Err(Error::usage("Option folder should be a directory."));
    }
    Ok(())
}

/// Builder for [`GenerateOptions`].
#[derive(Debug, Clone)]
pub struct GenerateOptionsBuilder {
    options: GenerateOptions,
}

impl GenerateOptionsBuilder {
    fn new(work_directory: impl Into<PathBuf>) -> Self {
        Self {
            options: GenerateOptions {
                work_directory: work_directory.into(),
                module: DEFAULT_MODULE.to_string(),
                url: None,
                model_file: None,
                folder: None,
                without_contracts: false,
            },
        }
    }

    /// Sets the module name.
    #[must_use]
    pub fn module(mut self, module: impl Into<String>) -> Self {
        self.options.module = module.into();
        self
    }

    /// Sets the remote service base URL.
    #[must_use]
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.options.url = Some(url.into());
        self
    }

    /// Sets a saved model document to read instead of fetching.
    #[must_use]
    pub fn model_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.options.model_file = Some(path.into());
        self
    }

    /// Sets the output folder.
    #[must_use]
    pub fn folder(mut self, folder: impl Into<String>) -> Self {
        self.options.folder = Some(folder.into());
        self
    }

    /// Skips interface and data-transfer type generation.
    #[must_use]
    pub const fn without_contracts(mut self, without_contracts: bool) -> Self {
        self.options.without_contracts = without_contracts;
        self
    }

    /// Builds the options.
    #[must_use]
    pub fn build(self) -> GenerateOptions {
        self.options
    }
}

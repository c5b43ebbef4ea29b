//! Export of generated files to disk.
//!
//! Overwrite files are replaced on every run. Create-once files are written
//! only when absent, so user edits in them survive regeneration.

use proxygen_codegen::{GeneratedCode, GeneratedFile, WritePolicy};
use proxygen_core::{Error, Result};
use std::fs;
use std::io::Write;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info};

/// Suffix appended to a file name while it is being written.
const TEMP_SUFFIX: &str = ".tmp";

/// Options for exporting generated files.
///
/// # Examples
///
/// ```
/// use proxygen_files::ExportOptions;
///
/// let options = ExportOptions::default()
///     .with_atomic(false)
///     .with_log_root("/src/Acme.BookStore.HttpApi.Client");
///
/// assert!(!options.atomic);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    /// Write through a temporary file and rename it into place.
    ///
    /// Default: true
    pub atomic: bool,

    /// Directory log lines are made relative to.
    ///
    /// Default: `None`, paths are logged relative to the export base.
    pub log_root: Option<PathBuf>,
}

impl ExportOptions {
    /// Enables or disables atomic writes.
    #[must_use]
    pub const fn with_atomic(mut self, atomic: bool) -> Self {
        self.atomic = atomic;
        self
    }

    /// Sets the directory log lines are made relative to.
    #[must_use]
    pub fn with_log_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.log_root = Some(root.into());
        self
    }

    fn log_path(&self, path: &Path, relative: &str) -> String {
        self.log_root
            .as_deref()
            .and_then(|root| path.strip_prefix(root).ok())
            .map_or_else(|| relative.to_string(), |p| p.display().to_string())
    }
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            atomic: true,
            log_root: None,
        }
    }
}

/// Outcome of an export.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportReport {
    /// Relative paths written in this run
    pub written: Vec<String>,
    /// Create-once paths left untouched because they already existed
    pub skipped: Vec<String>,
}

impl ExportReport {
    /// Total number of files considered.
    #[must_use]
    pub fn total(&self) -> usize {
        self.written.len() + self.skipped.len()
    }
}

/// Writes every generated file under `base`.
///
/// Parent directories are created as needed. Files are processed in the
/// order they were generated.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if a generated path escapes `base`, or
/// [`Error::IoError`] if a directory or file cannot be written.
pub fn export_generated(
    code: &GeneratedCode,
    base: impl AsRef<Path>,
    options: &ExportOptions,
) -> Result<ExportReport> {
    let base = base.as_ref();
    let mut report = ExportReport::default();

    for file in code.files() {
        let path = resolve_path(base, file.path())?;

        if file.policy == WritePolicy::CreateOnce && path.exists() {
            debug!(path = %file.path(), "Keeping existing user file");
            report.skipped.push(file.path().to_string());
            continue;
        }

        write_generated(&path, file, options)?;
        info!("Create {}", options.log_path(&path, file.path()));
        report.written.push(file.path().to_string());
    }

    Ok(report)
}

fn write_generated(path: &Path, file: &GeneratedFile, options: &ExportOptions) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    if options.atomic {
        write_file_atomic(path, file.content())
    } else {
        fs::write(path, file.content()).map_err(|e| Error::io(path, e))
    }
}

/// Writes `content` to a sibling temp file, then renames it over `path`.
fn write_file_atomic(path: &Path, content: &str) -> Result<()> {
    let mut temp_name = path.file_name().unwrap_or_default().to_os_string();
    temp_name.push(TEMP_SUFFIX);
    let temp_path = path.with_file_name(temp_name);

    let mut file = fs::File::create(&temp_path).map_err(|e| Error::io(&temp_path, e))?;
    file.write_all(content.as_bytes())
        .map_err(|e| Error::io(&temp_path, e))?;
    file.sync_all().map_err(|e| Error::io(&temp_path, e))?;
    drop(file);

    fs::rename(&temp_path, path).map_err(|e| Error::io(path, e))
}

/// Joins a `/`-separated relative path onto `base`.
fn resolve_path(base: &Path, relative: &str) -> Result<PathBuf> {
    let relative_path = Path::new(relative);
    let escapes = relative_path
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));

    if relative.is_empty() || escapes {
        return Err(Error::InvalidArgument(format!(
            "generated path must stay inside the output folder: {relative}"
        )));
    }

    Ok(relative.split('/').fold(base.to_path_buf(), |acc, part| acc.join(part)))
}

//! Audit copy of the fetched model and output removal.

use proxygen_core::{ApplicationApiDescriptionModel, Error, Result};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Writes the fetched model as indented JSON to `path`.
///
/// The parent directory is created when missing. An existing file is
/// replaced.
///
/// # Errors
///
/// Returns [`Error::SerializationError`] if the model cannot be serialized,
/// or [`Error::IoError`] if the file cannot be written.
pub fn write_json_artifact(path: &Path, model: &ApplicationApiDescriptionModel) -> Result<()> {
    let json = model.to_json_pretty()?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }
    fs::write(path, json).map_err(|e| Error::io(path, e))?;

    debug!(path = %path.display(), "Persisted API description model");
    Ok(())
}

/// Deletes the output folder and everything under it.
///
/// Returns `false` when there was nothing to delete.
///
/// # Errors
///
/// Returns [`Error::IoError`] if the folder exists but cannot be removed.
///
/// # Examples
///
/// ```
/// use proxygen_files::remove_output;
/// # use tempfile::TempDir;
///
/// # let temp_dir = TempDir::new().unwrap();
/// let output = temp_dir.path().join("ClientProxies");
/// std::fs::create_dir_all(output.join("Acme")).unwrap();
///
/// assert!(remove_output(&output).unwrap());
/// assert!(!output.exists());
/// assert!(!remove_output(&output).unwrap());
/// ```
pub fn remove_output(path: &Path) -> Result<bool> {
    if !path.is_dir() {
        debug!(path = %path.display(), "Nothing to remove");
        return Ok(false);
    }

    fs::remove_dir_all(path).map_err(|e| Error::io(path, e))?;
    info!(path = %path.display(), "Removed output folder");
    Ok(true)
}

//! Error types for client proxy generation.
//!
//! Every fallible operation in the workspace returns [`Result`]. The
//! variants map one-to-one onto the failure classes a generation run can
//! hit: bad invocation, model retrieval, filesystem, serialization and
//! template rendering. No operation retries; the first error aborts the run.
//!
//! # Examples
//!
//! ```
//! use proxygen_core::{Error, Result};
//!
//! fn check_folder(folder: &str) -> Result<()> {
//!     if folder.ends_with(".cs") {
//!         return Err(Error::UsageError {
//!             message: "Option folder should be a directory.".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//!
//! let err = check_folder("Proxy.cs").unwrap_err();
//! assert!(err.is_usage_error());
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for client proxy generation.
///
/// All errors in the system use this type, providing consistent error handling
/// across all crates in the workspace.
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid invocation detected before any side effect.
    ///
    /// Raised for a missing working directory, a working directory without
    /// a project file, a folder option that names a file, or an unknown
    /// module name.
    #[error("{message}")]
    UsageError {
        /// Description of the usage problem
        message: String,
    },

    /// The API description model could not be retrieved.
    #[error("Failed to fetch API description model from {location}")]
    FetchError {
        /// URL or file path the model was requested from
        location: String,
        /// Underlying error cause
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Filesystem operation failed.
    #[error("I/O error on {}", path.display())]
    IoError {
        /// Path the operation was acting on
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Serialization/deserialization error.
    ///
    /// Raised when JSON conversion of the API description model fails.
    #[error("Serialization error: {message}")]
    SerializationError {
        /// Description of the serialization failure
        message: String,
        /// Underlying serde error
        #[source]
        source: Option<serde_json::Error>,
    },

    /// Template registration or rendering failed.
    #[error("Template '{template}' failed: {message}")]
    TemplateError {
        /// Name of the template
        template: String,
        /// Description of the failure
        message: String,
    },

    /// Invalid argument error.
    ///
    /// Raised when CLI arguments or function parameters are invalid.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl Error {
    /// Creates a usage error from any displayable message.
    ///
    /// # Examples
    ///
    /// ```
    /// use proxygen_core::Error;
    ///
    /// let err = Error::usage("Specified directory does not exist.");
    /// assert!(err.is_usage_error());
    /// assert_eq!(err.to_string(), "Specified directory does not exist.");
    /// ```
    #[must_use]
    pub fn usage(message: impl Into<String>) -> Self {
        Self::UsageError {
            message: message.into(),
        }
    }

    /// Creates an I/O error bound to the path that was being accessed.
    #[must_use]
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::IoError {
            path: path.into(),
            source,
        }
    }

    /// Returns `true` if this is a usage error.
    #[must_use]
    pub const fn is_usage_error(&self) -> bool {
        matches!(self, Self::UsageError { .. })
    }

    /// Returns `true` if this is a model fetch error.
    ///
    /// # Examples
    ///
    /// ```
    /// use proxygen_core::Error;
    ///
    /// let err = Error::FetchError {
    ///     location: "https://localhost:44300".to_string(),
    ///     source: "connection refused".into(),
    /// };
    /// assert!(err.is_fetch_error());
    /// ```
    #[must_use]
    pub const fn is_fetch_error(&self) -> bool {
        matches!(self, Self::FetchError { .. })
    }

    /// Returns `true` if this is a filesystem error.
    #[must_use]
    pub const fn is_io_error(&self) -> bool {
        matches!(self, Self::IoError { .. })
    }

    /// Returns `true` if this is a serialization error.
    #[must_use]
    pub const fn is_serialization_error(&self) -> bool {
        matches!(self, Self::SerializationError { .. })
    }

    /// Returns `true` if this is a template error.
    #[must_use]
    pub const fn is_template_error(&self) -> bool {
        matches!(self, Self::TemplateError { .. })
    }
}

/// Result type alias for proxy generation operations.
///
/// # Examples
///
/// ```
/// use proxygen_core::{Result, Error};
///
/// fn module_name(value: &str) -> Result<&str> {
///     if value.is_empty() {
///         return Err(Error::InvalidArgument("module cannot be empty".to_string()));
///     }
///     Ok(value)
/// }
///
/// assert!(module_name("identity").is_ok());
/// assert!(module_name("").is_err());
/// ```
pub type Result<T> = std::result::Result<T, Error>;

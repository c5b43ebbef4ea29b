//! Filesystem side of proxy generation.
//!
//! Writes a [`GeneratedCode`](proxygen_codegen::GeneratedCode) file set under
//! an output root, honoring each file's
//! [`WritePolicy`](proxygen_codegen::WritePolicy), persists the audit copy of
//! the fetched model and removes the output folder on request.
//!
//! # Examples
//!
//! ```
//! use proxygen_codegen::{FileKind, GeneratedCode, GeneratedFile};
//! use proxygen_files::{ExportOptions, export_generated};
//! # use tempfile::TempDir;
//!
//! # let temp_dir = TempDir::new().unwrap();
//! let mut code = GeneratedCode::new();
//! code.add_file(GeneratedFile::new(
//!     "Acme/Books/BookClientProxy.cs",
//!     "public partial class BookClientProxy\n{\n}\n",
//!     FileKind::ClassStub,
//! ));
//!
//! let report = export_generated(&code, temp_dir.path(), &ExportOptions::default()).unwrap();
//! assert_eq!(report.written.len(), 1);
//! assert!(temp_dir.path().join("Acme/Books/BookClientProxy.cs").exists());
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod artifact;
pub mod filesystem;

pub use artifact::{remove_output, write_json_artifact};
pub use filesystem::{ExportOptions, ExportReport, export_generated};

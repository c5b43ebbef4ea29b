//! Types produced by code generation.
//!
//! A generation pass yields a [`GeneratedCode`] set of files with paths
//! relative to the output root. Each file carries a [`WritePolicy`] telling
//! the persistence layer whether an existing file may be replaced.
//!
//! # Examples
//!
//! ```
//! use proxygen_codegen::{FileKind, GeneratedCode, GeneratedFile, WritePolicy};
//!
//! let mut code = GeneratedCode::new();
//! code.add_file(GeneratedFile::new(
//!     "Acme/Books/BookClientProxy.cs",
//!     "public partial class BookClientProxy\n{\n}\n",
//!     FileKind::ClassStub,
//! ));
//!
//! assert_eq!(code.file_count(), 1);
//! assert_eq!(code.files[0].policy, WritePolicy::CreateOnce);
//! ```

use serde::{Deserialize, Serialize};

/// Result of code generation containing all generated files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneratedCode {
    /// Generated files in emission order
    pub files: Vec<GeneratedFile>,
}

impl GeneratedCode {
    /// Creates an empty file set.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self { files: Vec::new() }
    }

    /// Adds a generated file.
    pub fn add_file(&mut self, file: GeneratedFile) {
        self.files.push(file);
    }

    /// Appends every file of another set.
    pub fn extend(&mut self, other: Self) {
        self.files.extend(other.files);
    }

    /// Returns the number of generated files.
    #[inline]
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Returns an iterator over the generated files.
    #[inline]
    pub fn files(&self) -> impl Iterator<Item = &GeneratedFile> {
        self.files.iter()
    }

    /// Finds a file by its relative path.
    #[must_use]
    pub fn find(&self, path: &str) -> Option<&GeneratedFile> {
        self.files.iter().find(|file| file.path == path)
    }

    /// Counts files of the given kind.
    #[must_use]
    pub fn count_of(&self, kind: FileKind) -> usize {
        self.files.iter().filter(|file| file.kind == kind).count()
    }
}

/// What a generated file holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileKind {
    /// `<Controller>ClientProxy.Generated.cs`
    ProxyClass,
    /// `<Controller>ClientProxy.cs`, reserved for hand-written additions
    ClassStub,
    /// `<IServiceShortName>.cs`
    ServiceInterface,
    /// `<DtoShortName>.cs`
    Dto,
}

impl FileKind {
    /// Write policy applied to files of this kind.
    #[must_use]
    pub const fn policy(self) -> WritePolicy {
        match self {
            Self::ClassStub => WritePolicy::CreateOnce,
            Self::ProxyClass | Self::ServiceInterface | Self::Dto => WritePolicy::Overwrite,
        }
    }
}

/// How an existing file at the target path is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WritePolicy {
    /// Write only when the file does not exist yet.
    CreateOnce,
    /// Always replace the file.
    Overwrite,
}

/// A single generated file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedFile {
    /// Path relative to the output root, `/`-separated
    pub path: String,
    /// File content
    pub content: String,
    /// What the file holds
    pub kind: FileKind,
    /// Existing-file handling
    pub policy: WritePolicy,
}

impl GeneratedFile {
    /// Creates a file whose policy is derived from its kind.
    #[must_use]
    pub fn new(path: impl Into<String>, content: impl Into<String>, kind: FileKind) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            kind,
            policy: kind.policy(),
        }
    }

    /// Returns the file path.
    #[inline]
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the file content.
    #[inline]
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }
}

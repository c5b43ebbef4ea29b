//! Namespace import sets.
//!
//! Every type resolved while emitting a file contributes the namespace it
//! lives in. Emitters return their contributions as an [`ImportSet`] and the
//! file generator merges them, so the final `using` block is deduplicated
//! and sorted once per file.

use std::collections::BTreeSet;

/// Ordered, deduplicated set of namespaces a file needs to import.
///
/// # Examples
///
/// ```
/// use proxygen_codegen::ImportSet;
///
/// let mut imports = ImportSet::new();
/// imports.insert("System.Threading.Tasks");
/// imports.insert("System");
/// imports.insert("System");
///
/// assert_eq!(imports.len(), 2);
/// assert_eq!(imports.render_usings(), "using System;\nusing System.Threading.Tasks;");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSet {
    namespaces: BTreeSet<String>,
}

impl ImportSet {
    /// Creates an empty import set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            namespaces: BTreeSet::new(),
        }
    }

    /// Creates an import set seeded with the given namespaces.
    #[must_use]
    pub fn with_namespaces(namespaces: &[&str]) -> Self {
        let mut imports = Self::new();
        for namespace in namespaces {
            imports.insert(*namespace);
        }
        imports
    }

    /// Adds a namespace. Blank namespaces are ignored.
    pub fn insert(&mut self, namespace: impl Into<String>) {
        let namespace = namespace.into();
        if !namespace.trim().is_empty() {
            self.namespaces.insert(namespace);
        }
    }

    /// Merges another set into this one.
    pub fn merge(&mut self, other: Self) {
        self.namespaces.extend(other.namespaces);
    }

    /// Returns `true` if the namespace is present.
    #[must_use]
    pub fn contains(&self, namespace: &str) -> bool {
        self.namespaces.contains(namespace)
    }

    /// Number of distinct namespaces.
    #[must_use]
    pub fn len(&self) -> usize {
        self.namespaces.len()
    }

    /// Returns `true` if no namespace has been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.namespaces.is_empty()
    }

    /// Iterates over namespaces in lexicographic order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.namespaces.iter().map(String::as_str)
    }

    /// Renders the set as `using` directives, one per line.
    #[must_use]
    pub fn render_usings(&self) -> String {
        self.iter()
            .map(|namespace| format!("using {namespace};"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Extend<String> for ImportSet {
    fn extend<I: IntoIterator<Item = String>>(&mut self, iter: I) {
        for namespace in iter {
            self.insert(namespace);
        }
    }
}

//! Retrieval from a saved model document.

use crate::fetcher::{ModelFetcher, ModelRequest};
use async_trait::async_trait;
use proxygen_core::{ApplicationApiDescriptionModel, Error, Result};
use std::path::{Path, PathBuf};
use tracing::info;

/// Reads the model from a JSON file.
///
/// When type definitions are not requested they are dropped after
/// loading, matching what the service returns for `includeTypes=false`.
#[derive(Debug, Clone)]
pub struct FileModelFetcher {
    path: PathBuf,
}

impl FileModelFetcher {
    /// Creates a fetcher reading `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the model document.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ModelFetcher for FileModelFetcher {
    async fn fetch(&self, request: &ModelRequest) -> Result<ApplicationApiDescriptionModel> {
        info!("Reading API description from {}", self.path.display());

        let json = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| Error::FetchError {
                location: self.path.display().to_string(),
                source: Box::new(e),
            })?;

        let mut model = ApplicationApiDescriptionModel::from_json(&json)?;
        if !request.include_types {
            model.types.clear();
        }
        Ok(model)
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

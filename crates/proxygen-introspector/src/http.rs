//! Retrieval from a running service.

use crate::fetcher::{ModelFetcher, ModelRequest};
use async_trait::async_trait;
use proxygen_core::{ApplicationApiDescriptionModel, Error, Result};
use tracing::{debug, info};

/// Path of the API definition endpoint, relative to the service root.
pub const API_DEFINITION_PATH: &str = "api/abp/api-definition";

/// Fetches the model over HTTP.
///
/// # Examples
///
/// ```
/// use proxygen_introspector::{HttpModelFetcher, ModelRequest};
///
/// let fetcher = HttpModelFetcher::new("https://localhost:44300/").unwrap();
/// assert_eq!(
///     fetcher.endpoint(&ModelRequest::new("app", false)),
///     "https://localhost:44300/api/abp/api-definition?includeTypes=false"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct HttpModelFetcher {
    client: reqwest::Client,
    base_url: String,
}

impl HttpModelFetcher {
    /// Creates a fetcher for the service at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FetchError`] if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into();
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| fetch_error(&base_url, e))?;
        Ok(Self::with_client(client, base_url))
    }

    /// Creates a fetcher using a preconfigured client.
    #[must_use]
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Full URL requested for `request`.
    #[must_use]
    pub fn endpoint(&self, request: &ModelRequest) -> String {
        format!(
            "{}/{API_DEFINITION_PATH}?includeTypes={}",
            self.base_url.trim_end_matches('/'),
            request.include_types
        )
    }
}

#[async_trait]
impl ModelFetcher for HttpModelFetcher {
    async fn fetch(&self, request: &ModelRequest) -> Result<ApplicationApiDescriptionModel> {
        let url = self.endpoint(request);
        info!("Fetching API description from {url}");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| fetch_error(&url, e))?;
        let body = response.text().await.map_err(|e| fetch_error(&url, e))?;

        debug!(bytes = body.len(), "Received API description");
        ApplicationApiDescriptionModel::from_json(&body)
    }

    fn location(&self) -> String {
        self.base_url.clone()
    }
}

fn fetch_error(location: &str, source: reqwest::Error) -> Error {
    Error::FetchError {
        location: location.to_string(),
        source: Box::new(source),
    }
}

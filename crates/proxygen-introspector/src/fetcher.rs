//! The fetch collaborator interface.

use async_trait::async_trait;
use proxygen_core::{ApplicationApiDescriptionModel, Error, Result};
use tracing::debug;

/// Parameters of a model request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelRequest {
    /// Module the caller is interested in
    pub module: String,
    /// Ask for type definitions along with controllers
    pub include_types: bool,
}

impl ModelRequest {
    /// Creates a request for `module`.
    #[must_use]
    pub fn new(module: impl Into<String>, include_types: bool) -> Self {
        Self {
            module: module.into(),
            include_types,
        }
    }
}

/// Source of API description models.
///
/// Implementations perform a single attempt; failures surface as
/// [`Error::FetchError`] and are never retried.
#[async_trait]
pub trait ModelFetcher: Send + Sync {
    /// Retrieves the full model.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FetchError`] if the source is unreachable, or
    /// [`Error::SerializationError`] if the document is not a valid model.
    async fn fetch(&self, request: &ModelRequest) -> Result<ApplicationApiDescriptionModel>;

    /// Human-readable location of the source, for logs.
    fn location(&self) -> String;
}

/// Keeps only the requested module.
///
/// Module names match case-insensitively. Type definitions are kept in
/// full since controllers of the module may reference any of them.
///
/// # Errors
///
/// Returns [`Error::UsageError`] if the model has no such module.
///
/// # Examples
///
/// ```
/// use proxygen_core::ApplicationApiDescriptionModel;
/// use proxygen_introspector::select_module;
///
/// let model = ApplicationApiDescriptionModel::from_json(
///     r#"{"modules": {"app": {}, "identity": {}}}"#,
/// ).unwrap();
///
/// let selected = select_module(model, "Identity").unwrap();
/// assert_eq!(selected.modules.keys().collect::<Vec<_>>(), vec!["identity"]);
/// ```
pub fn select_module(
    mut model: ApplicationApiDescriptionModel,
    module: &str,
) -> Result<ApplicationApiDescriptionModel> {
    let key = model
        .modules
        .keys()
        .find(|name| name.eq_ignore_ascii_case(module))
        .cloned()
        .ok_or_else(|| Error::usage(format!("Module name: {module} is invalid")))?;

    model.modules.retain(|name, _| *name == key);
    debug!(module = %key, "Selected module");
    Ok(model)
}

/// Fetches the model and narrows it to the requested module.
///
/// # Errors
///
/// Propagates fetch errors and the [`select_module`] usage error.
pub async fn fetch_module(
    fetcher: &dyn ModelFetcher,
    request: &ModelRequest,
) -> Result<ApplicationApiDescriptionModel> {
    let model = fetcher.fetch(request).await?;
    select_module(model, &request.module)
}

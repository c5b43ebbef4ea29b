//! API description model retrieval.
//!
//! The generator never talks to a service directly. It asks a
//! [`ModelFetcher`] for the model and narrows it to one module with
//! [`select_module`]. Two fetchers are provided:
//!
//! - [`HttpModelFetcher`]: `GET {url}/api/abp/api-definition?includeTypes=...`
//! - [`FileModelFetcher`]: a saved model document, such as a previous audit
//!   artifact

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod fetcher;
pub mod file;
pub mod http;

pub use fetcher::{ModelFetcher, ModelRequest, fetch_module, select_module};
pub use file::FileModelFetcher;
pub use http::{API_DEFINITION_PATH, HttpModelFetcher};

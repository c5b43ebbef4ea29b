//! C# client proxy generation from API description models.
//!
//! Transforms the controllers and type definitions published by a remote
//! service into proxy classes, service interfaces and data-transfer types
//! using Handlebars templates.
//!
//! # Architecture
//!
//! - [`type_name`]: descriptor parsing and short-name resolution
//! - [`imports`]: per-file `using` sets
//! - [`template_engine`]: the four built-in templates
//! - [`method`]: proxy and interface method emission
//! - [`dto`]: data-transfer type emission
//! - [`generator`]: assembles emitted pieces into a [`GeneratedCode`] set

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod dto;
pub mod generator;
pub mod imports;
pub mod method;
pub mod template_engine;
pub mod type_name;
pub mod types;

pub use generator::{GeneratorOptions, OutputLayout, ProxyGenerator};
pub use imports::ImportSet;
pub use template_engine::TemplateEngine;
pub use type_name::{ResolvedType, TypeRef, resolve};
pub use types::{FileKind, GeneratedCode, GeneratedFile, WritePolicy};

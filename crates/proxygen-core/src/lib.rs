//! Core types and errors for C# client proxy generation.
//!
//! This crate provides the foundational types shared by every other crate
//! in the proxygen workspace.
//!
//! # Architecture
//!
//! The core consists of:
//! - The API description model fetched from a remote service (`model`)
//! - Error hierarchy with contextual information
//! - Generation options and their pre-flight validation
//! - CLI value types (`OutputFormat`, `ExitCode`)

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

mod error;
mod options;

pub mod cli;
pub mod model;

pub use error::{Error, Result};
pub use model::{
    ActionApiDescriptionModel, ApplicationApiDescriptionModel, ControllerApiDescriptionModel,
    ControllerInterfaceApiDescriptionModel, InterfaceMethodApiDescriptionModel,
    MethodParameterApiDescriptionModel, ModuleApiDescriptionModel, ParameterApiDescriptionModel,
    PropertyApiDescriptionModel, ReturnValueApiDescriptionModel, TypeApiDescriptionModel,
    TypedParameter,
};
pub use options::{DEFAULT_MODULE, DEFAULT_PROXY_DIRECTORY, GenerateOptions, GenerateOptionsBuilder};

//! API description model.
//!
//! Mirrors the JSON document a remote service publishes at
//! `api/abp/api-definition`: modules own controllers, controllers own
//! actions and implemented service interfaces, and a flat map of type
//! definitions describes every data-transfer type the actions reference.
//!
//! Type names are carried as descriptor strings (`[T]` for arrays,
//! `{K:V}` for dictionaries, `Outer<A,B>` for generics, trailing `?` for
//! nullable). Parsing them is the job of the code generator.
//!
//! The model is fetched once per run and only ever borrowed afterwards.
//!
//! # Examples
//!
//! ```
//! use proxygen_core::ApplicationApiDescriptionModel;
//!
//! let json = r#"{
//!     "modules": {
//!         "app": {
//!             "rootPath": "app",
//!             "remoteServiceName": "Default",
//!             "controllers": {}
//!         }
//!     },
//!     "types": {}
//! }"#;
//!
//! let model = ApplicationApiDescriptionModel::from_json(json).unwrap();
//! assert!(model.modules.contains_key("app"));
//! ```

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Root of the API description model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApplicationApiDescriptionModel {
    /// Modules keyed by module name
    pub modules: BTreeMap<String, ModuleApiDescriptionModel>,
    /// Type definitions keyed by fully-qualified type name
    pub types: BTreeMap<String, TypeApiDescriptionModel>,
}

impl ApplicationApiDescriptionModel {
    /// Parses a model from its JSON representation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SerializationError`] if the document is not a valid
    /// API description model.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::SerializationError {
            message: format!("invalid API description model: {e}"),
            source: Some(e),
        })
    }

    /// Serializes the model as indented JSON.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SerializationError`] if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::SerializationError {
            message: format!("failed to serialize API description model: {e}"),
            source: Some(e),
        })
    }

    /// Iterates over every controller of every module, in stable order.
    pub fn controllers(&self) -> impl Iterator<Item = &ControllerApiDescriptionModel> {
        self.modules
            .values()
            .flat_map(|module| module.controllers.values())
    }
}

/// A module (remote service group) of the API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ModuleApiDescriptionModel {
    /// Root route path of the module
    pub root_path: String,
    /// Remote service name used by clients to resolve the endpoint
    pub remote_service_name: String,
    /// Controllers keyed by controller name
    pub controllers: BTreeMap<String, ControllerApiDescriptionModel>,
}

/// A controller exposing a service over HTTP.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ControllerApiDescriptionModel {
    /// Short controller name, e.g. `Book`
    pub controller_name: String,
    /// Controller group name
    pub controller_group_name: Option<String>,
    /// Whether the controller is exposed as a remote service
    pub is_remote_service: bool,
    /// Whether the controller is classified as an integration service
    pub is_integration_service: bool,
    /// API version the controller belongs to
    pub api_version: Option<String>,
    /// Fully-qualified name of the controller's declaring type
    #[serde(rename = "type")]
    pub type_name: String,
    /// Implemented service interfaces; the last one is the primary interface
    pub interfaces: Vec<ControllerInterfaceApiDescriptionModel>,
    /// Actions keyed by unique action name
    pub actions: BTreeMap<String, ActionApiDescriptionModel>,
}

impl ControllerApiDescriptionModel {
    /// Returns the primary (last) implemented service interface.
    #[must_use]
    pub fn primary_interface(&self) -> Option<&ControllerInterfaceApiDescriptionModel> {
        self.interfaces.last()
    }
}

/// A service interface implemented by a controller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ControllerInterfaceApiDescriptionModel {
    /// Fully-qualified interface type name
    #[serde(rename = "type")]
    pub type_name: String,
    /// Short interface name
    pub name: Option<String>,
    /// Methods declared on the interface
    pub methods: Vec<InterfaceMethodApiDescriptionModel>,
}

/// A method signature declared on a service interface.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InterfaceMethodApiDescriptionModel {
    /// Method name
    pub name: String,
    /// Parameters as declared on the method
    pub parameters_on_method: Vec<MethodParameterApiDescriptionModel>,
    /// Return type
    pub return_value: ReturnValueApiDescriptionModel,
}

/// An HTTP action of a controller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ActionApiDescriptionModel {
    /// Unique action name within the controller
    pub unique_name: String,
    /// Method name
    pub name: String,
    /// HTTP method
    pub http_method: Option<String>,
    /// Route template
    pub url: Option<String>,
    /// API versions the action supports
    pub supported_versions: Vec<String>,
    /// Parameters as declared on the originating method
    pub parameters_on_method: Vec<MethodParameterApiDescriptionModel>,
    /// Parameters as bound by the HTTP layer
    pub parameters: Vec<ParameterApiDescriptionModel>,
    /// Return type
    pub return_value: ReturnValueApiDescriptionModel,
    /// Whether anonymous calls are allowed
    pub allow_anonymous: Option<bool>,
    /// Fully-qualified name of the type that declared the method
    pub implement_from: String,
}

/// A parameter as declared on a method.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MethodParameterApiDescriptionModel {
    /// Parameter name
    pub name: String,
    /// Assembly-qualified type string
    pub type_as_string: Option<String>,
    /// Type descriptor
    #[serde(rename = "type")]
    pub type_name: String,
    /// Simplified type descriptor
    pub type_simple: Option<String>,
    /// Whether the parameter is optional
    pub is_optional: bool,
    /// Default value, if any
    pub default_value: Option<serde_json::Value>,
}

/// A parameter as bound by the HTTP layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParameterApiDescriptionModel {
    /// Name of the method parameter this binding belongs to
    pub name_on_method: String,
    /// Bound name
    pub name: String,
    /// JSON property name
    pub json_name: Option<String>,
    /// Type descriptor
    #[serde(rename = "type")]
    pub type_name: String,
    /// Simplified type descriptor
    pub type_simple: Option<String>,
    /// Whether the parameter is optional
    pub is_optional: bool,
    /// Default value, if any
    pub default_value: Option<serde_json::Value>,
    /// Route constraint types
    pub constraint_types: Option<Vec<String>>,
    /// Binding source (`Path`, `Query`, `Body`, ...)
    pub binding_source_id: Option<String>,
    /// Name of the descriptor the parameter was flattened from
    pub descriptor_name: Option<String>,
}

/// Return type of an action or interface method.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReturnValueApiDescriptionModel {
    /// Type descriptor
    #[serde(rename = "type")]
    pub type_name: String,
    /// Simplified type descriptor
    pub type_simple: Option<String>,
}

/// Definition of a data-transfer type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TypeApiDescriptionModel {
    /// Fully-qualified base type name
    pub base_type: Option<String>,
    /// Whether the type is an enum
    pub is_enum: bool,
    /// Enum member names, parallel to `enum_values`
    pub enum_names: Option<Vec<String>>,
    /// Enum member values, parallel to `enum_names`
    pub enum_values: Option<Vec<serde_json::Value>>,
    /// Generic argument names of a generic definition
    pub generic_arguments: Option<Vec<String>>,
    /// Declared properties
    pub properties: Option<Vec<PropertyApiDescriptionModel>>,
}

impl TypeApiDescriptionModel {
    /// Returns the generic arguments, empty for non-generic types.
    #[must_use]
    pub fn generic_arguments(&self) -> &[String] {
        self.generic_arguments.as_deref().unwrap_or_default()
    }

    /// Returns the declared properties, empty when absent.
    #[must_use]
    pub fn properties(&self) -> &[PropertyApiDescriptionModel] {
        self.properties.as_deref().unwrap_or_default()
    }

    /// Returns the non-empty base type name, if any.
    #[must_use]
    pub fn base_type(&self) -> Option<&str> {
        self.base_type.as_deref().filter(|base| !base.is_empty())
    }

    /// Pairs enum member names with their values.
    ///
    /// Members without a matching value are dropped.
    pub fn enum_members(&self) -> impl Iterator<Item = (&str, &serde_json::Value)> {
        let names = self.enum_names.as_deref().unwrap_or_default();
        let values = self.enum_values.as_deref().unwrap_or_default();
        names.iter().map(String::as_str).zip(values)
    }
}

/// A property of a data-transfer type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PropertyApiDescriptionModel {
    /// Property name
    pub name: String,
    /// JSON property name
    pub json_name: Option<String>,
    /// Type descriptor
    #[serde(rename = "type")]
    pub type_name: String,
    /// Simplified type descriptor
    pub type_simple: Option<String>,
    /// Whether the property is required
    pub is_required: bool,
    /// Minimum string length
    pub min_length: Option<i64>,
    /// Maximum string length
    pub max_length: Option<i64>,
    /// Minimum value
    pub minimum: Option<String>,
    /// Maximum value
    pub maximum: Option<String>,
    /// Validation pattern
    pub regex: Option<String>,
}

/// A named, typed parameter.
///
/// Implemented by both parameter kinds of the model so emitters can work
/// with either list.
pub trait TypedParameter {
    /// Parameter name.
    fn name(&self) -> &str;

    /// Type descriptor of the parameter.
    fn type_name(&self) -> &str;
}

impl TypedParameter for MethodParameterApiDescriptionModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn type_name(&self) -> &str {
        &self.type_name
    }
}

impl TypedParameter for ParameterApiDescriptionModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn type_name(&self) -> &str {
        &self.type_name
    }
}

//! Method emission for proxy classes and service interfaces.
//!
//! A method is async-shaped when its name ends with [`ASYNC_SUFFIX`]. Proxy
//! classes forward async-shaped methods to the remote service and stub out
//! everything else. Interfaces only declare signatures.
//!
//! Each emitter returns the method text together with the namespaces its
//! parameter and return types need, leaving the merge to the caller.
//!
//! Parameter lists differ per shape:
//!
//! | Kind | Parameters | Duplicates |
//! |------|------------|------------|
//! | class sync | `parameters` | collapsed by name |
//! | class async | `parametersOnMethod` | kept |
//! | interface sync | `parametersOnMethod` | collapsed by name |
//! | interface async | `parametersOnMethod` | kept |

use crate::imports::ImportSet;
use crate::type_name::resolve;
use proxygen_core::{ActionApiDescriptionModel, InterfaceMethodApiDescriptionModel, TypedParameter};
use std::collections::HashSet;
use tracing::warn;

/// Name suffix marking an async-shaped method.
pub const ASYNC_SUFFIX: &str = "Async";

/// Resolved return type name meaning "no result".
const VOID: &str = "void";

const SYNC_NOT_SUPPORTED_COMMENT: &str = "//Client Proxy does not support the synchronization method, you should always use asynchronous methods as a best practice";

/// Shape of an emitted method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MethodKind {
    /// Proxy class method that throws `NotImplementedException`
    ClassSync,
    /// Proxy class method forwarding to `RequestAsync`
    ClassAsync,
    /// Interface declaration of a sync-shaped method
    InterfaceSync,
    /// Interface declaration returning `Task`
    InterfaceAsync,
}

impl MethodKind {
    /// Kind used when emitting `name` into a proxy class.
    #[must_use]
    pub fn for_class(name: &str) -> Self {
        if is_async_method(name) {
            Self::ClassAsync
        } else {
            Self::ClassSync
        }
    }

    /// Kind used when emitting `name` into a service interface.
    #[must_use]
    pub fn for_interface(name: &str) -> Self {
        if is_async_method(name) {
            Self::InterfaceAsync
        } else {
            Self::InterfaceSync
        }
    }

    /// Returns `true` for the async-shaped kinds.
    #[must_use]
    pub const fn is_async(self) -> bool {
        matches!(self, Self::ClassAsync | Self::InterfaceAsync)
    }
}

/// Returns `true` if the method name ends with [`ASYNC_SUFFIX`].
#[must_use]
pub fn is_async_method(name: &str) -> bool {
    name.ends_with(ASYNC_SUFFIX)
}

/// Emitted method text plus the imports it requires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmittedMethod {
    /// Method text, unindented, without trailing newline
    pub text: String,
    /// Namespaces referenced by the signature
    pub imports: ImportSet,
}

/// A parameter after type resolution.
struct FormalParameter<'a> {
    type_name: String,
    name: &'a str,
}

/// Emits a proxy class method for a controller action.
///
/// # Examples
///
/// ```
/// use proxygen_codegen::method::emit_action;
/// use proxygen_core::ActionApiDescriptionModel;
///
/// let mut action = ActionApiDescriptionModel::default();
/// action.name = "GetAsync".to_string();
/// action.return_value.type_name = "System.Void".to_string();
///
/// let emitted = emit_action(&action);
/// assert_eq!(
///     emitted.text,
///     "public virtual async Task GetAsync()\n{\n    await RequestAsync(nameof(GetAsync));\n}"
/// );
/// ```
#[must_use]
pub fn emit_action(action: &ActionApiDescriptionModel) -> EmittedMethod {
    let mut imports = ImportSet::new();
    let return_type = resolve_return_type(&action.name, &action.return_value.type_name, &mut imports);

    let text = if MethodKind::for_class(&action.name).is_async() {
        let parameters = formal_parameters(&action.parameters_on_method, false, &mut imports);
        class_async_method(&action.name, &return_type, &parameters)
    } else {
        let parameters = formal_parameters(&action.parameters, true, &mut imports);
        class_sync_method(&action.name, &return_type, &parameters)
    };

    EmittedMethod { text, imports }
}

/// Emits a service interface method declaration.
///
/// # Examples
///
/// ```
/// use proxygen_codegen::method::emit_interface_method;
/// use proxygen_core::{InterfaceMethodApiDescriptionModel, MethodParameterApiDescriptionModel};
///
/// let mut method = InterfaceMethodApiDescriptionModel::default();
/// method.name = "GetAsync".to_string();
/// method.return_value.type_name = "Acme.Books.BookDto".to_string();
/// method.parameters_on_method.push(MethodParameterApiDescriptionModel {
///     name: "id".to_string(),
///     type_name: "System.Guid".to_string(),
///     ..Default::default()
/// });
///
/// let emitted = emit_interface_method(&method);
/// assert_eq!(emitted.text, "Task<BookDto> GetAsync(Guid id);");
/// assert!(emitted.imports.contains("Acme.Books"));
/// ```
#[must_use]
pub fn emit_interface_method(method: &InterfaceMethodApiDescriptionModel) -> EmittedMethod {
    let mut imports = ImportSet::new();
    let return_type = resolve_return_type(&method.name, &method.return_value.type_name, &mut imports);
    let kind = MethodKind::for_interface(&method.name);

    let parameters = formal_parameters(
        &method.parameters_on_method,
        kind == MethodKind::InterfaceSync,
        &mut imports,
    );
    let return_sign = if kind.is_async() {
        task_of(&return_type)
    } else {
        format!("public {return_type}")
    };

    let text = format!(
        "{return_sign} {}({});",
        method.name,
        signature_list(&parameters)
    );

    EmittedMethod { text, imports }
}

/// Resolves a return type, falling back to `void` when the model omits it.
fn resolve_return_type(method_name: &str, descriptor: &str, imports: &mut ImportSet) -> String {
    if descriptor.trim().is_empty() {
        warn!("Method {method_name} has no return type, emitting void");
        return VOID.to_string();
    }
    resolve_into(descriptor, imports)
}

fn resolve_into(descriptor: &str, imports: &mut ImportSet) -> String {
    let resolved = resolve(descriptor);
    imports.merge(resolved.imports);
    resolved.name
}

fn formal_parameters<'a, P: TypedParameter>(
    parameters: &'a [P],
    collapse_duplicates: bool,
    imports: &mut ImportSet,
) -> Vec<FormalParameter<'a>> {
    let mut seen = HashSet::new();
    parameters
        .iter()
        .filter(|parameter| !collapse_duplicates || seen.insert(parameter.name()))
        .map(|parameter| FormalParameter {
            type_name: resolve_into(parameter.type_name(), imports),
            name: parameter.name(),
        })
        .collect()
}

fn signature_list(parameters: &[FormalParameter<'_>]) -> String {
    parameters
        .iter()
        .map(|parameter| format!("{} {}", parameter.type_name, parameter.name))
        .collect::<Vec<_>>()
        .join(", ")
}

fn task_of(return_type: &str) -> String {
    if return_type == VOID {
        "Task".to_string()
    } else {
        format!("Task<{return_type}>")
    }
}

fn class_sync_method(name: &str, return_type: &str, parameters: &[FormalParameter<'_>]) -> String {
    format!(
        "public virtual {return_type} {name}({})\n{{\n    {SYNC_NOT_SUPPORTED_COMMENT}\n    throw new System.NotImplementedException();\n}}",
        signature_list(parameters)
    )
}

fn class_async_method(name: &str, return_type: &str, parameters: &[FormalParameter<'_>]) -> String {
    let payload = if parameters.is_empty() {
        String::new()
    } else {
        let entries = parameters
            .iter()
            .map(|parameter| {
                format!(
                    "        {{ typeof({}), {} }}",
                    parameter.type_name, parameter.name
                )
            })
            .collect::<Vec<_>>()
            .join(",\n");
        format!(", new ClientProxyRequestTypeValue\n    {{\n{entries}\n    }}")
    };

    let call = if return_type == VOID {
        format!("await RequestAsync(nameof({name}){payload});")
    } else {
        format!("return await RequestAsync<{return_type}>(nameof({name}){payload});")
    };

    format!(
        "public virtual async {} {name}({})\n{{\n    {call}\n}}",
        task_of(return_type),
        signature_list(parameters)
    )
}

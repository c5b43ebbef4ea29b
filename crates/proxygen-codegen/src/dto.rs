//! Data-transfer type emission.
//!
//! Types are selected from the model's type map by namespace: every type
//! living under the namespace of a controller is a candidate. Wrapper types
//! from the framework's DTO namespace are unwrapped to their payload type,
//! and system types are dropped.

use crate::imports::ImportSet;
use crate::template_engine::{DtoContext, ProxyTemplate, TemplateEngine};
use crate::type_name::{TypeRef, resolve, type_namespace};
use proxygen_core::{ApplicationApiDescriptionModel, Result, TypeApiDescriptionModel};
use serde_json::Value;
use std::collections::BTreeSet;
use tracing::{debug, warn};

/// Namespace of framework generic wrappers such as `PagedResultDto<T>`.
pub const GENERIC_DTO_NAMESPACE: &str = "Volo.Abp.Application.Dtos.";

/// Prefixes of types that are never emitted.
const SYSTEM_PREFIXES: &[&str] = &["System.", "[System."];

/// Namespaces every DTO file imports.
pub const DTO_USINGS: &[&str] = &[
    "System",
    "System.Collections.Generic",
    "Volo.Abp",
    "Volo.Abp.Application.Dtos",
    "Volo.Abp.ObjectExtending",
];

/// A rendered data-transfer type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmittedDto {
    /// Key of the type in the model's type map
    pub type_key: String,
    /// Instantiated qualified name
    pub type_name: String,
    /// Namespace the type is declared in
    pub namespace: String,
    /// File name without extension
    pub file_stem: String,
    /// Rendered source
    pub content: String,
}

/// Collects the type keys to emit, sorted and deduplicated.
///
/// # Examples
///
/// ```
/// use proxygen_codegen::dto::collect_type_keys;
/// use proxygen_core::ApplicationApiDescriptionModel;
///
/// let model = ApplicationApiDescriptionModel::from_json(r#"{
///     "modules": {"app": {"controllers": {"Book": {"type": "Acme.Books.BookController"}}}},
///     "types": {
///         "Acme.Books.BookDto": {},
///         "Volo.Abp.Application.Dtos.PagedResultDto<Acme.Books.BookDto>": {},
///         "Acme.Authors.AuthorDto": {}
///     }
/// }"#).unwrap();
///
/// assert_eq!(collect_type_keys(&model), vec!["Acme.Books.BookDto".to_string()]);
/// ```
#[must_use]
pub fn collect_type_keys(model: &ApplicationApiDescriptionModel) -> Vec<String> {
    let namespaces: BTreeSet<String> = model
        .controllers()
        .filter_map(|controller| type_namespace(&controller.type_name))
        .collect();

    model
        .types
        .keys()
        .filter(|key| namespaces.iter().any(|namespace| key.starts_with(namespace.as_str())))
        .filter_map(|key| unwrap_generic_wrapper(key))
        .filter(|key| !SYSTEM_PREFIXES.iter().any(|prefix| key.starts_with(prefix)))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Replaces a framework wrapper reference with its payload type.
///
/// Returns `None` for wrappers with more than one argument, which are not
/// emitted.
fn unwrap_generic_wrapper(key: &str) -> Option<String> {
    if !key.starts_with(GENERIC_DTO_NAMESPACE) || !key.contains('<') {
        return Some(key.to_string());
    }

    match TypeRef::parse(key) {
        TypeRef::Generic { args, .. } if args.len() == 1 => {
            args.first().map(ToString::to_string)
        }
        TypeRef::Generic { args, .. } => {
            warn!(
                "Skipping {key}: wrapper has {} generic arguments, expected one",
                args.len()
            );
            None
        }
        _ => Some(key.to_string()),
    }
}

/// Renders one type definition.
///
/// # Errors
///
/// Returns [`proxygen_core::Error::TemplateError`] if rendering fails.
pub fn emit_type(
    engine: &TemplateEngine<'_>,
    type_key: &str,
    definition: &TypeApiDescriptionModel,
) -> Result<EmittedDto> {
    let generic_arguments = definition.generic_arguments();
    let instantiated = TypeRef::parse(type_key).substitute_placeholders(generic_arguments);
    let type_name = instantiated.to_string();

    let mut imports = ImportSet::with_namespaces(DTO_USINGS);
    if let Some(namespace) = type_namespace(type_key) {
        imports.insert(namespace);
    }

    let short_name = instantiated.render(&mut imports);
    let declaration = if definition.is_enum {
        format!("enum {short_name}")
    } else {
        definition.base_type().map_or_else(
            || format!("class {short_name}"),
            |base_type| {
                let base = resolve(base_type);
                imports.merge(base.imports);
                format!("class {short_name} : {}", base.name)
            },
        )
    };

    let members = if definition.is_enum {
        enum_members(definition)
    } else {
        definition
            .properties()
            .iter()
            .map(|property| {
                let property_type = if generic_arguments.is_empty() {
                    resolve(&property.type_name)
                } else {
                    resolve(&type_name)
                };
                imports.merge(property_type.imports);
                format!(
                    "public {} {} {{ get; set; }}",
                    property_type.name, property.name
                )
            })
            .collect()
    };

    let namespace = instantiated
        .namespace()
        .map(str::to_string)
        .unwrap_or_default();
    let file_stem = short_name
        .split('<')
        .next()
        .unwrap_or(&short_name)
        .to_string();

    let content = engine.render(
        ProxyTemplate::Dto,
        &DtoContext {
            usings: imports.render_usings(),
            namespace: namespace.clone(),
            dto_name: declaration,
            members: TemplateEngine::render_members(&members),
        },
    )?;

    debug!(type_key, %type_name, "Emitted data type");

    Ok(EmittedDto {
        type_key: type_key.to_string(),
        type_name,
        namespace,
        file_stem,
        content,
    })
}

/// Renders every collected type that has a definition in the model.
///
/// # Errors
///
/// Returns the first rendering error.
pub fn emit_types(
    engine: &TemplateEngine<'_>,
    model: &ApplicationApiDescriptionModel,
) -> Result<Vec<EmittedDto>> {
    collect_type_keys(model)
        .iter()
        .filter_map(|key| {
            let definition = model.types.get(key);
            if definition.is_none() {
                debug!("No definition for {key}, skipping");
            }
            definition.map(|definition| (key, definition))
        })
        .filter(|(key, _)| {
            let qualified = type_namespace(key).is_some();
            if !qualified {
                warn!("Skipping {key}: type name has no namespace");
            }
            qualified
        })
        .map(|(key, definition)| emit_type(engine, key, definition))
        .collect()
}

fn enum_members(definition: &TypeApiDescriptionModel) -> Vec<String> {
    let members = definition
        .enum_members()
        .map(|(name, value)| format!("{name} = {}", enum_value(value)))
        .collect::<Vec<_>>();

    if members.is_empty() {
        Vec::new()
    } else {
        vec![members.join(",\n")]
    }
}

fn enum_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

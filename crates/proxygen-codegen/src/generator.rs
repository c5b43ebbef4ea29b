//! Client proxy file-set generator.
//!
//! Turns an API description model into the files of a client proxy project:
//! per service controller a user-editable partial class, a fully generated
//! proxy class and optionally its service interface, plus one file per
//! referenced data type when contracts are requested.
//!
//! # Examples
//!
//! ```
//! use proxygen_codegen::{GeneratorOptions, OutputLayout, ProxyGenerator};
//! use proxygen_core::ApplicationApiDescriptionModel;
//!
//! let model = ApplicationApiDescriptionModel::from_json(r#"{
//!     "modules": {"app": {"controllers": {"Book": {
//!         "controllerName": "Book",
//!         "type": "Acme.Books.BookController",
//!         "interfaces": [{"type": "Acme.Books.IBookAppService"}]
//!     }}}}
//! }"#).unwrap();
//!
//! let generator = ProxyGenerator::new(GeneratorOptions {
//!     layout: OutputLayout::Namespaced,
//!     with_contracts: false,
//! }).unwrap();
//! let code = generator.generate(&model).unwrap();
//!
//! assert!(code.find("Acme/Books/BookClientProxy.cs").is_some());
//! assert!(code.find("Acme/Books/BookClientProxy.Generated.cs").is_some());
//! ```

use crate::dto::emit_types;
use crate::imports::ImportSet;
use crate::method::{emit_action, emit_interface_method};
use crate::template_engine::{
    ClassContext, ClassStubContext, InterfaceContext, ProxyTemplate, TemplateEngine,
};
use crate::type_name::{resolve_name, type_namespace};
use crate::types::{FileKind, GeneratedCode, GeneratedFile};
use proxygen_core::{
    ActionApiDescriptionModel, ApplicationApiDescriptionModel, ControllerApiDescriptionModel,
    Result,
};
use tracing::{debug, info};

/// Service-name suffixes recognized on a controller's primary interface,
/// in match order.
pub const SERVICE_POSTFIXES: &[&str] = &[
    "AppService",
    "ApplicationService",
    "IntService",
    "IntegrationService",
    "Service",
];

/// Namespace of the framework's base application-service interfaces.
pub const APP_SERVICE_PREFIX: &str = "Volo.Abp.Application.Services";

/// Namespaces every proxy class imports.
pub const CLASS_USINGS: &[&str] = &[
    "System",
    "System.Collections.Generic",
    "System.Threading.Tasks",
    "Volo.Abp",
    "Volo.Abp.Application.Dtos",
    "Volo.Abp.Http.Client",
    "Volo.Abp.Http.Modeling",
    "Volo.Abp.DependencyInjection",
    "Volo.Abp.Http.Client.ClientProxying",
];

/// Namespaces every service interface imports.
pub const INTERFACE_USINGS: &[&str] = &[
    "System",
    "System.Collections.Generic",
    "System.Threading.Tasks",
    "Volo.Abp",
    "Volo.Abp.Application.Dtos",
    "Volo.Abp.Application.Services",
];

/// Suffix appended to a controller name to form the proxy class name.
const CLIENT_PROXY_SUFFIX: &str = "ClientProxy";

/// Where files are placed below the output root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputLayout {
    /// Nested directories mirroring each file's namespace
    #[default]
    Namespaced,
    /// Every file directly in the output root
    Flat,
}

/// Generator options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorOptions {
    /// File placement
    pub layout: OutputLayout,
    /// Emit service interfaces and data types
    pub with_contracts: bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            layout: OutputLayout::Namespaced,
            with_contracts: true,
        }
    }
}

/// Returns the first recognized service suffix `type_name` ends with.
///
/// # Examples
///
/// ```
/// use proxygen_codegen::generator::service_postfix;
///
/// assert_eq!(service_postfix("Acme.IBookAppService"), Some("AppService"));
/// assert_eq!(service_postfix("Acme.IBookRepository"), None);
/// ```
#[must_use]
pub fn service_postfix(type_name: &str) -> Option<&'static str> {
    SERVICE_POSTFIXES
        .iter()
        .copied()
        .find(|postfix| type_name.ends_with(postfix))
}

/// Returns `true` if the controller's primary interface names a service.
#[must_use]
pub fn is_service_controller(controller: &ControllerApiDescriptionModel) -> bool {
    controller
        .primary_interface()
        .is_some_and(|interface| service_postfix(&interface.type_name).is_some())
}

/// Returns `true` for names following the application-service interface
/// convention: a leading `I` and a recognized service suffix anywhere.
#[must_use]
pub fn is_app_service_interface(type_name: &str) -> bool {
    type_name.starts_with('I')
        && SERVICE_POSTFIXES
            .iter()
            .any(|postfix| type_name.contains(postfix))
}

/// Returns `true` if an action belongs on the proxy for `service_interface`.
#[must_use]
pub fn should_generate_method(service_interface: &str, action: &ActionApiDescriptionModel) -> bool {
    action.implement_from.starts_with(APP_SERVICE_PREFIX)
        || action.implement_from.starts_with(service_interface)
        || is_app_service_interface(&resolve_name(&action.implement_from))
}

/// Generates client proxy file sets.
///
/// # Thread Safety
///
/// This type is `Send` and `Sync`.
#[derive(Debug)]
pub struct ProxyGenerator<'a> {
    engine: TemplateEngine<'a>,
    options: GeneratorOptions,
}

impl ProxyGenerator<'_> {
    /// Creates a generator.
    ///
    /// # Errors
    ///
    /// Returns an error if template registration fails.
    pub fn new(options: GeneratorOptions) -> Result<Self> {
        Ok(Self {
            engine: TemplateEngine::new()?,
            options,
        })
    }

    /// Returns the generator options.
    #[must_use]
    pub const fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    /// Generates every file for the model.
    ///
    /// Controllers come first in model order, followed by data types when
    /// contracts are requested.
    ///
    /// # Errors
    ///
    /// Returns the first template rendering error.
    pub fn generate(&self, model: &ApplicationApiDescriptionModel) -> Result<GeneratedCode> {
        let mut code = self.generate_controllers(model)?;
        if self.options.with_contracts {
            code.extend(self.generate_dtos(model)?);
        }

        info!(files = code.file_count(), "Generated client proxy sources");
        Ok(code)
    }

    /// Generates files for every service controller.
    ///
    /// # Errors
    ///
    /// Returns the first template rendering error.
    pub fn generate_controllers(
        &self,
        model: &ApplicationApiDescriptionModel,
    ) -> Result<GeneratedCode> {
        let mut code = GeneratedCode::new();
        for controller in model.controllers() {
            if is_service_controller(controller) {
                code.extend(self.generate_controller(controller)?);
            } else {
                debug!(
                    controller = %controller.controller_name,
                    "Skipping controller without a service interface"
                );
            }
        }
        Ok(code)
    }

    /// Generates the files of one controller.
    ///
    /// The controller is expected to pass [`is_service_controller`]; one
    /// without interfaces yields no files.
    ///
    /// # Errors
    ///
    /// Returns the first template rendering error.
    pub fn generate_controller(
        &self,
        controller: &ControllerApiDescriptionModel,
    ) -> Result<GeneratedCode> {
        let mut code = GeneratedCode::new();
        let Some(interface) = controller.primary_interface() else {
            return Ok(code);
        };

        let service_full_name = interface.type_name.as_str();
        let service_name = last_segment(service_full_name);
        let service_namespace = type_namespace(service_full_name);
        let namespace = type_namespace(&controller.type_name).unwrap_or_default();
        let class_name = format!("{}{CLIENT_PROXY_SUFFIX}", controller.controller_name);

        let stub = self.engine.render(
            ProxyTemplate::ClassStub,
            &ClassStubContext {
                namespace: namespace.clone(),
                class_name: class_name.clone(),
            },
        )?;
        code.add_file(GeneratedFile::new(
            self.file_path(&namespace, &format!("{class_name}.cs")),
            stub,
            FileKind::ClassStub,
        ));

        let mut imports = ImportSet::with_namespaces(CLASS_USINGS);
        imports.extend(service_namespace.clone());
        let mut members = Vec::new();
        for action in controller.actions.values() {
            if !should_generate_method(service_full_name, action) {
                debug!(action = %action.name, "Skipping action not declared by a service");
                continue;
            }
            let emitted = emit_action(action);
            imports.merge(emitted.imports);
            members.push(emitted.text);
        }

        let class = self.engine.render(
            ProxyTemplate::Class,
            &ClassContext {
                usings: imports.render_usings(),
                namespace: namespace.clone(),
                class_name: class_name.clone(),
                service_interface: service_name.to_string(),
                integration_service: controller.is_integration_service,
                members: TemplateEngine::render_members(&members),
            },
        )?;
        code.add_file(GeneratedFile::new(
            self.file_path(&namespace, &format!("{class_name}.Generated.cs")),
            class,
            FileKind::ProxyClass,
        ));

        if self.options.with_contracts {
            let mut imports = ImportSet::with_namespaces(INTERFACE_USINGS);
            imports.extend(service_namespace);
            let members = interface
                .methods
                .iter()
                .map(|method| {
                    let emitted = emit_interface_method(method);
                    imports.merge(emitted.imports);
                    emitted.text
                })
                .collect::<Vec<_>>();

            let content = self.engine.render(
                ProxyTemplate::Interface,
                &InterfaceContext {
                    usings: imports.render_usings(),
                    namespace: namespace.clone(),
                    service_interface: service_name.to_string(),
                    members: TemplateEngine::render_members(&members),
                },
            )?;
            code.add_file(GeneratedFile::new(
                self.file_path(&namespace, &format!("{service_name}.cs")),
                content,
                FileKind::ServiceInterface,
            ));
        }

        debug!(
            controller = %controller.controller_name,
            files = code.file_count(),
            "Generated controller proxy"
        );
        Ok(code)
    }

    /// Generates one file per referenced data type.
    ///
    /// # Errors
    ///
    /// Returns the first template rendering error.
    pub fn generate_dtos(&self, model: &ApplicationApiDescriptionModel) -> Result<GeneratedCode> {
        let mut code = GeneratedCode::new();
        for dto in emit_types(&self.engine, model)? {
            code.add_file(GeneratedFile::new(
                self.file_path(&dto.namespace, &format!("{}.cs", dto.file_stem)),
                dto.content,
                FileKind::Dto,
            ));
        }
        Ok(code)
    }

    fn file_path(&self, namespace: &str, file_name: &str) -> String {
        match self.options.layout {
            OutputLayout::Namespaced if !namespace.is_empty() => {
                format!("{}/{file_name}", namespace.replace('.', "/"))
            }
            OutputLayout::Namespaced | OutputLayout::Flat => file_name.to_string(),
        }
    }
}

fn last_segment(type_name: &str) -> &str {
    type_name.rsplit('.').next().unwrap_or(type_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proxygen_core::ControllerInterfaceApiDescriptionModel;

    fn controller(name: &str, interfaces: &[&str]) -> ControllerApiDescriptionModel {
        ControllerApiDescriptionModel {
            controller_name: name.to_string(),
            type_name: format!("Acme.Books.{name}Controller"),
            interfaces: interfaces
                .iter()
                .map(|type_name| ControllerInterfaceApiDescriptionModel {
                    type_name: (*type_name).to_string(),
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        }
    }

    fn action(name: &str, implement_from: &str) -> ActionApiDescriptionModel {
        ActionApiDescriptionModel {
            name: name.to_string(),
            implement_from: implement_from.to_string(),
            return_value: proxygen_core::ReturnValueApiDescriptionModel {
                type_name: "System.Void".to_string(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_service_postfix_first_match_wins() {
        assert_eq!(service_postfix("IBookApplicationService"), Some("ApplicationService"));
        assert_eq!(service_postfix("IBookIntegrationService"), Some("IntegrationService"));
        assert_eq!(service_postfix("IBookService"), Some("Service"));
        assert_eq!(service_postfix("IBookServices"), None);
    }

    #[test]
    fn test_service_controller_uses_last_interface() {
        assert!(is_service_controller(&controller(
            "Book",
            &["Acme.IDisposable", "Acme.Books.IBookAppService"]
        )));
        assert!(!is_service_controller(&controller(
            "Book",
            &["Acme.Books.IBookAppService", "Acme.IDisposable"]
        )));
        assert!(!is_service_controller(&controller("Book", &[])));
    }

    #[test]
    fn test_app_service_interface_predicate() {
        assert!(is_app_service_interface("IBookAppService"));
        assert!(is_app_service_interface("ICrudAppService<BookDto, Guid>"));
        assert!(!is_app_service_interface("BookAppService"));
        assert!(!is_app_service_interface("IRepository"));
    }

    #[test]
    fn test_should_generate_method() {
        let service = "Acme.Books.IBookAppService";
        assert!(should_generate_method(
            service,
            &action("GetAsync", "Volo.Abp.Application.Services.IReadOnlyAppService<Acme.Books.BookDto,System.Guid>")
        ));
        assert!(should_generate_method(
            service,
            &action("PublishAsync", "Acme.Books.IBookAppService")
        ));
        assert!(should_generate_method(
            service,
            &action("ShareAsync", "Acme.Shared.ISharingAppService")
        ));
        assert!(!should_generate_method(
            service,
            &action("Dispose", "Acme.Books.BookController")
        ));
    }

    #[test]
    fn test_generate_controller_files() {
        let generator = ProxyGenerator::new(GeneratorOptions::default()).unwrap();
        let mut controller = controller("Book", &["Acme.Books.IBookAppService"]);
        controller
            .actions
            .insert("DeleteAsync".to_string(), action("DeleteAsync", "Acme.Books.IBookAppService"));
        controller
            .actions
            .insert("Internal".to_string(), action("Internal", "Acme.Books.BookController"));

        let code = generator.generate_controller(&controller).unwrap();
        let paths: Vec<_> = code.files().map(GeneratedFile::path).collect();
        assert_eq!(
            paths,
            vec![
                "Acme/Books/BookClientProxy.cs",
                "Acme/Books/BookClientProxy.Generated.cs",
                "Acme/Books/IBookAppService.cs",
            ]
        );

        let class = code.find("Acme/Books/BookClientProxy.Generated.cs").unwrap();
        assert!(class.content.contains("public virtual async Task DeleteAsync()"));
        assert!(!class.content.contains("Internal"));
        assert!(class.content.contains("using Acme.Books;\n"));
        assert!(!class.content.contains("[IntegrationService]"));
    }

    #[test]
    fn test_flat_layout_without_contracts() {
        let generator = ProxyGenerator::new(GeneratorOptions {
            layout: OutputLayout::Flat,
            with_contracts: false,
        })
        .unwrap();
        let controller = controller("Book", &["Acme.Books.IBookAppService"]);

        let code = generator.generate_controller(&controller).unwrap();
        let paths: Vec<_> = code.files().map(GeneratedFile::path).collect();
        assert_eq!(paths, vec!["BookClientProxy.cs", "BookClientProxy.Generated.cs"]);
    }

    #[test]
    fn test_integration_service_attribute() {
        let generator = ProxyGenerator::new(GeneratorOptions::default()).unwrap();
        let mut controller = controller("Stock", &["Acme.Books.IStockIntegrationService"]);
        controller.is_integration_service = true;

        let code = generator.generate_controller(&controller).unwrap();
        let class = code.find("Acme/Books/StockClientProxy.Generated.cs").unwrap();
        assert!(class.content.contains("[IntegrationService]\npublic partial class StockClientProxy"));
    }

    #[test]
    fn test_non_service_controller_skipped() {
        let model = ApplicationApiDescriptionModel::from_json(
            r#"{"modules": {"app": {"controllers": {
                "Home": {"controllerName": "Home", "type": "Acme.Web.HomeController",
                         "interfaces": [{"type": "Acme.Web.IHomeHelper"}]}
            }}}}"#,
        )
        .unwrap();
        let generator = ProxyGenerator::new(GeneratorOptions::default()).unwrap();

        let code = generator.generate(&model).unwrap();
        assert_eq!(code.file_count(), 0);
    }
}

//! Template engine for C# source generation using Handlebars.
//!
//! Four templates are registered at construction, one per artifact kind:
//!
//! | Template | Artifact |
//! |----------|----------|
//! | [`ProxyTemplate::Class`] | `<Controller>ClientProxy.Generated.cs` |
//! | [`ProxyTemplate::ClassStub`] | `<Controller>ClientProxy.cs` |
//! | [`ProxyTemplate::Interface`] | `<IService>.cs` |
//! | [`ProxyTemplate::Dto`] | `<Dto>.cs` |
//!
//! HTML escaping is disabled so generic brackets and quotes pass through
//! untouched. Members are joined with [`TemplateEngine::render_members`]
//! before rendering, so templates only see scalar slots.
//!
//! # Examples
//!
//! ```
//! use proxygen_codegen::template_engine::{ClassStubContext, ProxyTemplate, TemplateEngine};
//!
//! let engine = TemplateEngine::new().unwrap();
//! let stub = engine
//!     .render(
//!         ProxyTemplate::ClassStub,
//!         &ClassStubContext {
//!             namespace: "Acme.Books".to_string(),
//!             class_name: "BookClientProxy".to_string(),
//!         },
//!     )
//!     .unwrap();
//!
//! assert!(stub.contains("public partial class BookClientProxy"));
//! ```

use handlebars::Handlebars;
use proxygen_core::{Error, Result};
use serde::Serialize;
use std::fmt;

/// Indentation applied to members inside a type body.
const MEMBER_INDENT: &str = "    ";

/// Built-in templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProxyTemplate {
    /// Fully generated client proxy class
    Class,
    /// User-editable partial class
    ClassStub,
    /// Service interface
    Interface,
    /// Data-transfer type or enum
    Dto,
}

impl ProxyTemplate {
    /// All built-in templates.
    pub const ALL: [Self; 4] = [Self::Class, Self::ClassStub, Self::Interface, Self::Dto];

    /// Registered template name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::ClassStub => "class_stub",
            Self::Interface => "interface",
            Self::Dto => "dto",
        }
    }

    const fn source(self) -> &'static str {
        match self {
            Self::Class => include_str!("../templates/class.cs.hbs"),
            Self::ClassStub => include_str!("../templates/class_stub.cs.hbs"),
            Self::Interface => include_str!("../templates/interface.cs.hbs"),
            Self::Dto => include_str!("../templates/dto.cs.hbs"),
        }
    }
}

impl fmt::Display for ProxyTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Bindings for [`ProxyTemplate::Class`].
#[derive(Debug, Clone, Serialize)]
pub struct ClassContext {
    /// Rendered `using` block
    pub usings: String,
    /// Namespace the proxy is declared in
    pub namespace: String,
    /// `<Controller>ClientProxy`
    pub class_name: String,
    /// Short name of the primary service interface
    pub service_interface: String,
    /// Adds the `[IntegrationService]` attribute
    pub integration_service: bool,
    /// Joined member block
    pub members: String,
}

/// Bindings for [`ProxyTemplate::ClassStub`].
#[derive(Debug, Clone, Serialize)]
pub struct ClassStubContext {
    /// Namespace the proxy is declared in
    pub namespace: String,
    /// `<Controller>ClientProxy`
    pub class_name: String,
}

/// Bindings for [`ProxyTemplate::Interface`].
#[derive(Debug, Clone, Serialize)]
pub struct InterfaceContext {
    /// Rendered `using` block
    pub usings: String,
    /// Namespace of the service interface
    pub namespace: String,
    /// Short name of the service interface
    pub service_interface: String,
    /// Joined member block
    pub members: String,
}

/// Bindings for [`ProxyTemplate::Dto`].
#[derive(Debug, Clone, Serialize)]
pub struct DtoContext {
    /// Rendered `using` block
    pub usings: String,
    /// Namespace of the instantiated type
    pub namespace: String,
    /// Declaration head, e.g. `class BookDto : EntityDto<Guid>` or `enum BookType`
    pub dto_name: String,
    /// Joined member block
    pub members: String,
}

/// Template engine for proxy generation.
///
/// # Thread Safety
///
/// This type is `Send` and `Sync`, so one engine can serve a whole run.
#[derive(Debug)]
pub struct TemplateEngine<'a> {
    handlebars: Handlebars<'a>,
}

impl TemplateEngine<'_> {
    /// Creates an engine with every built-in template registered.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TemplateError`] if a built-in template fails to
    /// parse.
    pub fn new() -> Result<Self> {
        let mut handlebars = Handlebars::new();

        // Strict mode: fail on missing variables
        handlebars.set_strict_mode(true);
        handlebars.register_escape_fn(handlebars::no_escape);

        for template in ProxyTemplate::ALL {
            handlebars
                .register_template_string(template.name(), template.source())
                .map_err(|e| Error::TemplateError {
                    template: template.name().to_string(),
                    message: format!("registration failed: {e}"),
                })?;
        }

        Ok(Self { handlebars })
    }

    /// Renders a built-in template.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TemplateError`] if the context is missing a field
    /// the template uses or cannot be serialized.
    pub fn render<T: Serialize>(&self, template: ProxyTemplate, context: &T) -> Result<String> {
        self.handlebars
            .render(template.name(), context)
            .map_err(|e| Error::TemplateError {
                template: template.name().to_string(),
                message: e.to_string(),
            })
    }

    /// Joins members into a type body slot.
    ///
    /// Every non-empty line is indented one level and members are separated
    /// by a blank line. No members yields an empty string.
    ///
    /// # Examples
    ///
    /// ```
    /// use proxygen_codegen::template_engine::TemplateEngine;
    ///
    /// let body = TemplateEngine::render_members(&[
    ///     "int A { get; set; }".to_string(),
    ///     "int B { get; set; }".to_string(),
    /// ]);
    /// assert_eq!(body, "    int A { get; set; }\n\n    int B { get; set; }");
    /// ```
    #[must_use]
    pub fn render_members(members: &[String]) -> String {
        members
            .iter()
            .map(|member| indent(member))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

fn indent(text: &str) -> String {
    text.lines()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{MEMBER_INDENT}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

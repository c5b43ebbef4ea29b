//! Type descriptor parsing and resolution.
//!
//! The API description model encodes type structure textually:
//!
//! | Descriptor | Meaning |
//! |------------|---------|
//! | `[T]` | array of `T` |
//! | `{K:V}` | dictionary from `K` to `V` |
//! | `Outer<A,B>` | generic instantiation |
//! | `T?` | nullable `T` |
//!
//! Descriptors are parsed into a [`TypeRef`] tree and rendered back as C#
//! display names: qualified names are shortened to their last segment and
//! the namespaces they came from are collected as imports.
//!
//! # Examples
//!
//! ```
//! use proxygen_codegen::type_name::resolve;
//!
//! let resolved = resolve("Acme.Shared.Page<Acme.Books.BookDto,Acme.Authors.AuthorDto>");
//! assert_eq!(resolved.name, "Page<BookDto,AuthorDto>");
//! assert!(resolved.imports.contains("Acme.Shared"));
//! assert!(resolved.imports.contains("Acme.Books"));
//! assert!(resolved.imports.contains("Acme.Authors"));
//! ```

use crate::imports::ImportSet;
use std::fmt;

/// Characters that terminate a type name token.
const DELIMITERS: &[char] = &['<', '>', ',', '[', ']', '{', '}', ':'];

/// Parsed type descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeRef {
    /// A plain (possibly qualified) type name.
    Simple {
        /// Qualified name without the nullable marker
        name: String,
        /// Trailing `?` was present
        nullable: bool,
    },
    /// `[T]`
    Array {
        /// Element type
        element: Box<TypeRef>,
        /// Trailing `?` was present
        nullable: bool,
    },
    /// `{K:V}`
    Dictionary {
        /// Key type
        key: Box<TypeRef>,
        /// Value type
        value: Box<TypeRef>,
        /// Trailing `?` was present
        nullable: bool,
    },
    /// `Outer<A,B,...>`
    Generic {
        /// Qualified name of the generic type
        name: String,
        /// Type arguments in declaration order
        args: Vec<TypeRef>,
        /// Trailing `?` was present
        nullable: bool,
    },
}

impl TypeRef {
    /// Parses a descriptor.
    ///
    /// Parsing never fails: text that does not follow the descriptor grammar
    /// is kept verbatim as a simple name.
    ///
    /// # Examples
    ///
    /// ```
    /// use proxygen_codegen::type_name::TypeRef;
    ///
    /// let parsed = TypeRef::parse("[System.String]");
    /// assert!(matches!(parsed, TypeRef::Array { nullable: false, .. }));
    /// assert_eq!(parsed.to_string(), "[System.String]");
    /// ```
    #[must_use]
    pub fn parse(descriptor: &str) -> Self {
        Parser::new(descriptor)
            .parse_complete()
            .unwrap_or_else(|| Self::simple(descriptor.trim()))
    }

    fn simple(raw: &str) -> Self {
        let (name, nullable) = split_nullable(raw);
        Self::Simple {
            name: name.to_string(),
            nullable,
        }
    }

    /// Namespace of the outermost named type.
    ///
    /// Arrays report the namespace of their element type; dictionaries and
    /// unqualified names have none.
    #[must_use]
    pub fn namespace(&self) -> Option<&str> {
        match self {
            Self::Simple { name, .. } | Self::Generic { name, .. } => namespace_of(name),
            Self::Array { element, .. } => element.namespace(),
            Self::Dictionary { .. } => None,
        }
    }

    /// Renders the display name and collects imports into `imports`.
    ///
    /// Built-in aliases apply to plain names, array elements and dictionary
    /// entries. Generic arguments keep their short CLR names.
    pub fn render(&self, imports: &mut ImportSet) -> String {
        self.render_with(imports, true)
    }

    fn render_with(&self, imports: &mut ImportSet, aliased: bool) -> String {
        match self {
            Self::Simple { name, nullable } => {
                if let Some(namespace) = namespace_of(name) {
                    imports.insert(namespace);
                }
                let short = last_segment(name);
                let short = if aliased {
                    alias_of(short).unwrap_or(short)
                } else {
                    short
                };
                with_nullable(short, *nullable)
            }
            Self::Array { element, nullable } => with_nullable(
                &format!("{}[]", element.render_with(imports, aliased)),
                *nullable,
            ),
            Self::Dictionary {
                key,
                value,
                nullable,
            } => with_nullable(
                &format!(
                    "Dictionary<{},{}>",
                    key.render_with(imports, aliased),
                    value.render_with(imports, aliased)
                ),
                *nullable,
            ),
            Self::Generic {
                name,
                args,
                nullable,
            } => {
                if let Some(namespace) = namespace_of(name) {
                    imports.insert(namespace);
                }
                let args = args
                    .iter()
                    .map(|arg| arg.render_with(imports, false))
                    .collect::<Vec<_>>()
                    .join(",");
                with_nullable(&format!("{}<{args}>", last_segment(name)), *nullable)
            }
        }
    }

    /// Replaces positional placeholders `T0`, `T1`, ... with the given
    /// argument names.
    ///
    /// Only whole type names are replaced, never substrings.
    ///
    /// # Examples
    ///
    /// ```
    /// use proxygen_codegen::type_name::TypeRef;
    ///
    /// let open = TypeRef::parse("Acme.Shared.Wrapper<T0,T1>");
    /// let closed = open.substitute_placeholders(&["TKey".to_string(), "TValue".to_string()]);
    /// assert_eq!(closed.to_string(), "Acme.Shared.Wrapper<TKey,TValue>");
    /// ```
    #[must_use]
    pub fn substitute_placeholders(&self, arguments: &[String]) -> Self {
        match self {
            Self::Simple { name, nullable } => {
                let position = name
                    .strip_prefix('T')
                    .filter(|index| !index.is_empty() && index.bytes().all(|b| b.is_ascii_digit()))
                    .and_then(|index| index.parse::<usize>().ok());
                position.and_then(|index| arguments.get(index)).map_or_else(
                    || self.clone(),
                    |argument| match Self::parse(argument) {
                        Self::Simple { name, nullable: inner } => Self::Simple {
                            name,
                            nullable: inner || *nullable,
                        },
                        other => other,
                    },
                )
            }
            Self::Array { element, nullable } => Self::Array {
                element: Box::new(element.substitute_placeholders(arguments)),
                nullable: *nullable,
            },
            Self::Dictionary {
                key,
                value,
                nullable,
            } => Self::Dictionary {
                key: Box::new(key.substitute_placeholders(arguments)),
                value: Box::new(value.substitute_placeholders(arguments)),
                nullable: *nullable,
            },
            Self::Generic {
                name,
                args,
                nullable,
            } => Self::Generic {
                name: name.clone(),
                args: args
                    .iter()
                    .map(|arg| arg.substitute_placeholders(arguments))
                    .collect(),
                nullable: *nullable,
            },
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Simple { name, nullable } => {
                write!(f, "{name}{}", if *nullable { "?" } else { "" })
            }
            Self::Array { element, nullable } => {
                write!(f, "[{element}]{}", if *nullable { "?" } else { "" })
            }
            Self::Dictionary {
                key,
                value,
                nullable,
            } => write!(f, "{{{key}:{value}}}{}", if *nullable { "?" } else { "" }),
            Self::Generic {
                name,
                args,
                nullable,
            } => {
                write!(f, "{name}<")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{arg}")?;
                }
                write!(f, ">{}", if *nullable { "?" } else { "" })
            }
        }
    }
}

/// A descriptor resolved to its display name plus required imports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedType {
    /// C# display name
    pub name: String,
    /// Namespaces the display name depends on
    pub imports: ImportSet,
}

/// Resolves a descriptor to its display name and imports.
///
/// # Examples
///
/// ```
/// use proxygen_codegen::type_name::resolve;
///
/// let resolved = resolve("[System.Int32?]");
/// assert_eq!(resolved.name, "int?[]");
/// assert!(resolved.imports.contains("System"));
/// ```
#[must_use]
pub fn resolve(descriptor: &str) -> ResolvedType {
    let mut imports = ImportSet::new();
    let name = TypeRef::parse(descriptor).render(&mut imports);
    ResolvedType { name, imports }
}

/// Resolves a descriptor to its display name, discarding imports.
#[must_use]
pub fn resolve_name(descriptor: &str) -> String {
    resolve(descriptor).name
}

/// Namespace of a fully-qualified type name.
///
/// For generic names the namespace of the outer type is returned, so
/// qualified generic arguments never leak into it.
///
/// # Examples
///
/// ```
/// use proxygen_codegen::type_name::type_namespace;
///
/// assert_eq!(type_namespace("Acme.Books.BookDto").as_deref(), Some("Acme.Books"));
/// assert_eq!(
///     type_namespace("Acme.Shared.Page<Acme.Books.BookDto>").as_deref(),
///     Some("Acme.Shared")
/// );
/// assert_eq!(type_namespace("BookDto"), None);
/// ```
#[must_use]
pub fn type_namespace(full_name: &str) -> Option<String> {
    TypeRef::parse(full_name).namespace().map(str::to_string)
}

/// Applies the built-in alias table to a type name.
///
/// Both qualified (`System.Int32`) and short (`Int32`) spellings map to the
/// C# keyword. A trailing `?` is preserved.
///
/// # Examples
///
/// ```
/// use proxygen_codegen::type_name::normalize_type_name;
///
/// assert_eq!(normalize_type_name("System.Boolean"), "bool");
/// assert_eq!(normalize_type_name("Int64?"), "long?");
/// assert_eq!(normalize_type_name("Guid"), "Guid");
/// ```
#[must_use]
pub fn normalize_type_name(name: &str) -> String {
    let (bare, nullable) = split_nullable(name);
    let short = bare.strip_prefix("System.").unwrap_or(bare);
    alias_of(short).map_or_else(
        || name.to_string(),
        |alias| with_nullable(alias, nullable),
    )
}

fn alias_of(short_name: &str) -> Option<&'static str> {
    let alias = match short_name {
        "Void" => "void",
        "Boolean" => "bool",
        "String" => "string",
        "Int32" => "int",
        "Int64" => "long",
        "Double" => "double",
        "Object" => "object",
        "Byte" => "byte",
        "Char" => "char",
        _ => return None,
    };
    Some(alias)
}

fn split_nullable(raw: &str) -> (&str, bool) {
    raw.strip_suffix('?')
        .map_or((raw, false), |bare| (bare, true))
}

fn with_nullable(name: &str, nullable: bool) -> String {
    if nullable {
        format!("{name}?")
    } else {
        name.to_string()
    }
}

fn namespace_of(name: &str) -> Option<&str> {
    name.rfind('.').map(|index| &name[..index])
}

fn last_segment(name: &str) -> &str {
    name.rsplit('.').next().unwrap_or(name)
}

/// Recursive-descent parser over a descriptor string.
struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    const fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn eat(&mut self, expected: char) -> bool {
        self.skip_whitespace();
        if self.peek() == Some(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    fn parse_complete(&mut self) -> Option<TypeRef> {
        let parsed = self.parse_type()?;
        self.skip_whitespace();
        (self.pos == self.input.len()).then_some(parsed)
    }

    fn parse_type(&mut self) -> Option<TypeRef> {
        self.skip_whitespace();
        match self.peek()? {
            '[' => {
                self.bump();
                let element = self.parse_type()?;
                if !self.eat(']') {
                    return None;
                }
                Some(TypeRef::Array {
                    element: Box::new(element),
                    nullable: self.eat('?'),
                })
            }
            '{' => {
                self.bump();
                let key = self.parse_type()?;
                if !self.eat(':') {
                    return None;
                }
                let value = self.parse_type()?;
                if !self.eat('}') {
                    return None;
                }
                Some(TypeRef::Dictionary {
                    key: Box::new(key),
                    value: Box::new(value),
                    nullable: self.eat('?'),
                })
            }
            _ => self.parse_named(),
        }
    }

    fn parse_named(&mut self) -> Option<TypeRef> {
        let start = self.pos;
        while self.peek().is_some_and(|c| !DELIMITERS.contains(&c)) {
            self.bump();
        }
        let raw = self.input[start..self.pos].trim();
        if raw.is_empty() {
            return None;
        }

        if !self.eat('<') {
            return Some(TypeRef::simple(raw));
        }

        let mut args = vec![self.parse_type()?];
        loop {
            if self.eat(',') {
                args.push(self.parse_type()?);
            } else if self.eat('>') {
                break;
            } else {
                return None;
            }
        }
        let nullable = self.eat('?');

        Some(TypeRef::Generic {
            name: raw.to_string(),
            args,
            nullable,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn imports_of(descriptor: &str) -> Vec<String> {
        resolve(descriptor)
            .imports
            .iter()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_simple_name_resolves_to_last_segment() {
        let resolved = resolve("Acme.BookStore.Books.BookDto");
        assert_eq!(resolved.name, "BookDto");
        assert_eq!(imports_of("Acme.BookStore.Books.BookDto"), vec!["Acme.BookStore.Books"]);
    }

    #[test]
    fn test_resolution_is_idempotent() {
        for descriptor in ["Acme.Books.BookDto", "System.Guid", "System.Int32?"] {
            let once = resolve_name(descriptor);
            assert_eq!(resolve_name(&once), once);
        }
    }

    #[test]
    fn test_alias_table() {
        assert_eq!(resolve_name("System.Boolean"), "bool");
        assert_eq!(resolve_name("Boolean"), "bool");
        assert_eq!(resolve_name("System.Int32?"), "int?");
        assert_eq!(resolve_name("System.Void"), "void");
        assert_eq!(resolve_name("System.String"), "string");
        assert_eq!(resolve_name("System.Int64"), "long");
        assert_eq!(resolve_name("System.Double"), "double");
        assert_eq!(resolve_name("System.Object"), "object");
        assert_eq!(resolve_name("System.Byte"), "byte");
        assert_eq!(resolve_name("System.Char"), "char");
        assert_eq!(resolve_name("System.DateTime"), "DateTime");
    }

    #[test]
    fn test_unqualified_name_has_no_import() {
        let resolved = resolve("Guid");
        assert_eq!(resolved.name, "Guid");
        assert!(resolved.imports.is_empty());
    }

    #[test]
    fn test_array_appends_suffix_and_keeps_imports() {
        let element = resolve("Acme.Books.BookDto");
        let array = resolve("[Acme.Books.BookDto]");
        assert_eq!(array.name, format!("{}[]", element.name));
        assert_eq!(array.imports, element.imports);
    }

    #[test]
    fn test_nested_array() {
        assert_eq!(resolve_name("[[System.Byte]]"), "byte[][]");
    }

    #[test]
    fn test_dictionary_resolves_both_sides() {
        let resolved = resolve("{System.String:Acme.Books.BookDto}");
        assert_eq!(resolved.name, "Dictionary<string,BookDto>");
        assert_eq!(imports_of("{System.String:Acme.Books.BookDto}"), vec!["Acme.Books", "System"]);
    }

    #[test]
    fn test_nullable_array() {
        let resolved = resolve("[System.Int32]?");
        assert_eq!(resolved.name, "int[]?");
        assert_eq!(imports_of("[System.Int32]?"), vec!["System"]);
    }

    #[test]
    fn test_nullable_dictionary() {
        let resolved = resolve("{System.String:Acme.Books.BookDto}?");
        assert_eq!(resolved.name, "Dictionary<string,BookDto>?");
        assert_eq!(imports_of("{System.String:Acme.Books.BookDto}?"), vec!["Acme.Books", "System"]);
    }

    #[test]
    fn test_nullable_array_inside_generic() {
        assert_eq!(
            resolve_name("System.Collections.Generic.List<[Acme.Books.BookDto]?>"),
            "List<BookDto[]?>"
        );
    }

    #[test]
    fn test_generic_multiple_arguments() {
        let resolved = resolve("Outer.NS.Outer<Inner.NS.A,Inner.NS.B>");
        assert_eq!(resolved.name, "Outer<A,B>");
        assert_eq!(
            imports_of("Outer.NS.Outer<Inner.NS.A,Inner.NS.B>"),
            vec!["Inner.NS", "Outer.NS"]
        );
    }

    #[test]
    fn test_nested_generics() {
        let descriptor = "Volo.Abp.Application.Dtos.PagedResultDto<Acme.Shared.Pair<Acme.Books.BookDto,System.Guid>>";
        let resolved = resolve(descriptor);
        assert_eq!(resolved.name, "PagedResultDto<Pair<BookDto,Guid>>");
        assert_eq!(
            imports_of(descriptor),
            vec!["Acme.Books", "Acme.Shared", "System", "Volo.Abp.Application.Dtos"]
        );
    }

    #[test]
    fn test_generic_arguments_keep_clr_names() {
        assert_eq!(
            resolve_name("System.Collections.Generic.List<System.String>"),
            "List<String>"
        );
    }

    #[test]
    fn test_generic_with_array_argument() {
        assert_eq!(
            resolve_name("System.Collections.Generic.List<[Acme.Books.BookDto]>"),
            "List<BookDto[]>"
        );
    }

    #[test]
    fn test_nullable_generic() {
        assert_eq!(
            resolve_name("Acme.Shared.Range<System.Int32>?"),
            "Range<Int32>?"
        );
    }

    #[test]
    fn test_unqualified_generic_argument_has_no_import() {
        assert_eq!(imports_of("Acme.Shared.Wrapper<T>"), vec!["Acme.Shared"]);
    }

    #[test]
    fn test_malformed_descriptor_kept_verbatim() {
        let parsed = TypeRef::parse("Acme.Broken<Foo");
        assert_eq!(
            parsed,
            TypeRef::Simple {
                name: "Acme.Broken<Foo".to_string(),
                nullable: false
            }
        );
    }

    #[test]
    fn test_display_round_trips_descriptor() {
        for descriptor in [
            "Acme.Books.BookDto",
            "System.Int32?",
            "[Acme.Books.BookDto]",
            "{System.String:[System.Int32]}",
            "[System.Int32]?",
            "{System.String:System.Int32}?",
            "Outer.NS.Outer<Inner.NS.A,Inner.NS.B<System.Guid>>",
        ] {
            assert_eq!(TypeRef::parse(descriptor).to_string(), descriptor);
        }
    }

    #[test]
    fn test_whitespace_after_comma_is_tolerated() {
        assert_eq!(
            resolve_name("Acme.Shared.Pair<Acme.A, Acme.B>"),
            "Pair<A,B>"
        );
    }

    #[test]
    fn test_substitute_only_whole_placeholders() {
        let open = TypeRef::parse("Acme.Shared.Wrapper<T0,AT0,T1>");
        let closed = open.substitute_placeholders(&["T".to_string()]);
        assert_eq!(closed.to_string(), "Acme.Shared.Wrapper<T,AT0,T1>");
    }

    #[test]
    fn test_type_namespace_of_array() {
        assert_eq!(type_namespace("[Acme.Books.BookDto]").as_deref(), Some("Acme.Books"));
        assert_eq!(type_namespace("{System.String:System.Int32}"), None);
    }

    #[test]
    fn test_normalize_keeps_unknown_names() {
        assert_eq!(normalize_type_name("Acme.Books.BookDto"), "Acme.Books.BookDto");
        assert_eq!(normalize_type_name("Char?"), "char?");
    }
}

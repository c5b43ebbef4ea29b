//! Output formatters for command results.
//!
//! Results are plain serializable structs. `json` prints them as indented
//! JSON, `text` as `key: value` lines for scripts, `pretty` as colored
//! `key: value` lines for terminals.

use anyhow::Result;
use colored::Colorize;
use proxygen_core::cli::OutputFormat;
use serde::Serialize;
use serde_json::Value;

/// Formats `data` in the requested format.
///
/// # Examples
///
/// ```
/// use proxygen_cli::formatters::format_output;
/// use proxygen_core::cli::OutputFormat;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Removal {
///     output: String,
///     removed: bool,
/// }
///
/// let result = Removal { output: "ClientProxies".to_string(), removed: true };
///
/// let json = format_output(&result, OutputFormat::Json)?;
/// assert!(json.contains("\"removed\": true"));
///
/// let text = format_output(&result, OutputFormat::Text)?;
/// assert_eq!(text, "output: ClientProxies\nremoved: true");
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn format_output<T: Serialize>(data: &T, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => json::format(data),
        OutputFormat::Text => text::format(data),
        OutputFormat::Pretty => pretty::format(data),
    }
}

/// JSON output.
pub mod json {
    use super::{Result, Serialize};

    /// Formats data as indented JSON.
    pub fn format<T: Serialize>(data: &T) -> Result<String> {
        Ok(serde_json::to_string_pretty(data)?)
    }
}

/// Plain `key: value` output.
pub mod text {
    use super::{Result, Serialize, Value, scalar};

    /// Formats data as one `key: value` line per field.
    ///
    /// Lists print one indented item per line below their key.
    pub fn format<T: Serialize>(data: &T) -> Result<String> {
        let value = serde_json::to_value(data)?;
        Ok(lines(&value, &str::to_owned, &scalar))
    }

    pub(super) fn lines(
        value: &Value,
        key_style: &impl Fn(&str) -> String,
        value_style: &impl Fn(&Value) -> String,
    ) -> String {
        let Value::Object(fields) = value else {
            return value_style(value);
        };

        let mut out = Vec::with_capacity(fields.len());
        for (key, field) in fields {
            match field {
                Value::Array(items) if items.is_empty() => {
                    out.push(format!("{}: []", key_style(key)));
                }
                Value::Array(items) => {
                    out.push(format!("{}:", key_style(key)));
                    out.extend(items.iter().map(|item| format!("  - {}", value_style(item))));
                }
                _ => out.push(format!("{}: {}", key_style(key), value_style(field))),
            }
        }
        out.join("\n")
    }
}

/// Colored, human-readable output.
pub mod pretty {
    use super::{Colorize, Result, Serialize, Value, scalar, text};

    /// Formats data like [`text::format`] with colored keys and values.
    pub fn format<T: Serialize>(data: &T) -> Result<String> {
        let value = serde_json::to_value(data)?;
        Ok(text::lines(
            &value,
            &|key: &str| key.replace('_', " ").bold().to_string(),
            &colorize,
        ))
    }

    fn colorize(value: &Value) -> String {
        match value {
            Value::Bool(true) => "yes".green().to_string(),
            Value::Bool(false) => "no".yellow().to_string(),
            Value::Number(_) => scalar(value).cyan().to_string(),
            Value::Null => "-".dimmed().to_string(),
            _ => scalar(value),
        }
    }
}

fn scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Summary {
        controllers: usize,
        module: String,
        skipped: Vec<String>,
        written: Vec<String>,
    }

    fn summary() -> Summary {
        Summary {
            controllers: 2,
            module: "app".to_string(),
            skipped: Vec::new(),
            written: vec!["A.cs".to_string(), "B.cs".to_string()],
        }
    }

    #[test]
    fn test_json_format() {
        let output = format_output(&summary(), OutputFormat::Json).unwrap();
        let parsed: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["module"], "app");
        assert_eq!(parsed["written"][1], "B.cs");
    }

    #[test]
    fn test_text_format() {
        let output = format_output(&summary(), OutputFormat::Text).unwrap();
        assert_eq!(
            output,
            "controllers: 2\nmodule: app\nskipped: []\nwritten:\n  - A.cs\n  - B.cs"
        );
    }

    #[test]
    fn test_text_format_scalar() {
        assert_eq!(text::format(&"plain").unwrap(), "plain");
    }

    #[test]
    fn test_pretty_format_contains_values() {
        colored::control::set_override(false);
        let output = format_output(&summary(), OutputFormat::Pretty).unwrap();
        assert!(output.contains("module: app"));
        assert!(output.contains("  - A.cs"));
    }

    #[test]
    fn test_pretty_bool() {
        colored::control::set_override(false);
        #[derive(Serialize)]
        struct Removal {
            removed: bool,
        }
        let output = pretty::format(&Removal { removed: false }).unwrap();
        assert_eq!(output, "removed: no");
    }
}

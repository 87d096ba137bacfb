//! Built-in formats and the loader trait

use std::sync::Arc;

use serde_json::Value;

use crate::error::{Error, Result};
use crate::handlers::{IniLoader, JsonLoader, TableLoader, TomlLoader, XmlLoader, YamlLoader};

/// The uniform shape every loader produces
pub type Mapping = serde_json::Map<String, Value>;

/// Built-in configuration formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// Data-only subset of PHP array literals (`return [...];`)
    Table,
    Json,
    Ini,
    Xml,
    Yaml,
    Toml,
}

impl Format {
    pub const ALL: [Format; 6] = [
        Self::Table,
        Self::Json,
        Self::Ini,
        Self::Xml,
        Self::Yaml,
        Self::Toml,
    ];

    /// Type tags handled by this format
    pub fn tags(&self) -> &'static [&'static str] {
        match self {
            Self::Table => &["php"],
            Self::Json => &["json"],
            Self::Ini => &["ini"],
            Self::Xml => &["xml"],
            Self::Yaml => &["yaml", "yml"],
            Self::Toml => &["toml"],
        }
    }

    /// Human-readable name used in error messages
    pub fn name(&self) -> &'static str {
        match self {
            Self::Table => "PHP table",
            Self::Json => "JSON",
            Self::Ini => "INI",
            Self::Xml => "XML",
            Self::Yaml => "YAML",
            Self::Toml => "TOML",
        }
    }

    /// The built-in loader for this format
    pub fn loader(&self) -> Arc<dyn FormatLoader> {
        match self {
            Self::Table => Arc::new(TableLoader::new()),
            Self::Json => Arc::new(JsonLoader::new()),
            Self::Ini => Arc::new(IniLoader::new()),
            Self::Xml => Arc::new(XmlLoader::new()),
            Self::Yaml => Arc::new(YamlLoader::new()),
            Self::Toml => Arc::new(TomlLoader::new()),
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Decodes raw resource content into a [`Mapping`].
///
/// Implementations report malformed input with [`Error::Syntax`]; the
/// registry attaches the resource path.
pub trait FormatLoader: Send + Sync {
    /// Format name used in error messages
    fn name(&self) -> &str;

    /// Decode `source` into a mapping
    fn load(&self, source: &[u8]) -> Result<Mapping>;
}

/// Interpret `source` as UTF-8 text, dropping a leading byte order mark.
pub(crate) fn source_text<'a>(format: &str, source: &'a [u8]) -> Result<&'a str> {
    let text = std::str::from_utf8(source)
        .map_err(|e| Error::syntax(format, format!("invalid UTF-8: {e}")))?;
    Ok(text.strip_prefix('\u{feff}').unwrap_or(text))
}

/// Turn a decoded document into the top-level mapping.
///
/// A top-level sequence becomes a mapping keyed by index; a null or scalar
/// document is rejected.
pub(crate) fn into_mapping(format: &str, value: Value) -> Result<Mapping> {
    match value {
        Value::Object(map) => Ok(map),
        Value::Array(items) => Ok(items
            .into_iter()
            .enumerate()
            .map(|(idx, item)| (idx.to_string(), item))
            .collect()),
        Value::Null => Err(Error::syntax(format, "document is empty or null")),
        other => Err(Error::syntax(
            format,
            format!("expected a mapping at the top level, found {other}"),
        )),
    }
}

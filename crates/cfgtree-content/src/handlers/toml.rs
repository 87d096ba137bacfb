//! TOML format loader

use serde_json::Value;

use crate::error::{Error, Result};
use crate::format::{FormatLoader, Mapping, source_text};

const FORMAT: &str = "TOML";

/// Loader for TOML files
///
/// Datetimes are kept as their TOML string form.
#[derive(Debug, Default)]
pub struct TomlLoader;

impl TomlLoader {
    pub fn new() -> Self {
        Self
    }
}

impl FormatLoader for TomlLoader {
    fn name(&self) -> &str {
        FORMAT
    }

    fn load(&self, source: &[u8]) -> Result<Mapping> {
        let text = source_text(FORMAT, source)?;
        let table: toml::Table = text
            .parse()
            .map_err(|e: toml::de::Error| Error::syntax(FORMAT, e.to_string()))?;
        Ok(table_to_json(&table))
    }
}

fn table_to_json(table: &toml::Table) -> Mapping {
    table
        .iter()
        .map(|(key, value)| (key.clone(), value_to_json(value)))
        .collect()
}

fn value_to_json(value: &toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s.clone()),
        toml::Value::Integer(i) => Value::Number((*i).into()),
        toml::Value::Float(f) => serde_json::Number::from_f64(*f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        toml::Value::Boolean(b) => Value::Bool(*b),
        toml::Value::Datetime(d) => Value::String(d.to_string()),
        toml::Value::Array(items) => Value::Array(items.iter().map(value_to_json).collect()),
        toml::Value::Table(t) => Value::Object(table_to_json(t)),
    }
}

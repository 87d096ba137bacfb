//! YAML format loader using serde_yaml

use serde_json::Value;
use serde_yaml::Value as YamlValue;

use crate::error::{Error, Result};
use crate::format::{FormatLoader, Mapping, into_mapping, source_text};

const FORMAT: &str = "YAML";

/// Loader for YAML files using serde_yaml
///
/// An empty document (or one holding only `~`) loads as an empty mapping.
#[derive(Debug, Default)]
pub struct YamlLoader;

impl YamlLoader {
    pub fn new() -> Self {
        Self
    }
}

impl FormatLoader for YamlLoader {
    fn name(&self) -> &str {
        FORMAT
    }

    fn load(&self, source: &[u8]) -> Result<Mapping> {
        let text = source_text(FORMAT, source)?;
        let yaml_value: YamlValue =
            serde_yaml::from_str(text).map_err(|e| Error::syntax(FORMAT, e.to_string()))?;

        match yaml_to_json(&yaml_value) {
            Value::Null => Ok(Mapping::new()),
            value => into_mapping(FORMAT, value),
        }
    }
}

fn yaml_to_json(value: &YamlValue) -> Value {
    match value {
        YamlValue::Null => Value::Null,
        YamlValue::Bool(b) => Value::Bool(*b),
        YamlValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Number(i.into())
            } else if let Some(u) = n.as_u64() {
                Value::Number(u.into())
            } else {
                n.as_f64()
                    .and_then(serde_json::Number::from_f64)
                    .map(Value::Number)
                    .unwrap_or(Value::Null)
            }
        }
        YamlValue::String(s) => Value::String(s.clone()),
        YamlValue::Sequence(items) => Value::Array(items.iter().map(yaml_to_json).collect()),
        YamlValue::Mapping(map) => Value::Object(
            map.iter()
                .filter_map(|(k, v)| key_to_string(k).map(|key| (key, yaml_to_json(v))))
                .collect(),
        ),
        YamlValue::Tagged(tagged) => yaml_to_json(&tagged.value),
    }
}

/// Scalar keys are stringified; compound keys are dropped
fn key_to_string(key: &YamlValue) -> Option<String> {
    match key {
        YamlValue::String(s) => Some(s.clone()),
        YamlValue::Bool(b) => Some(b.to_string()),
        YamlValue::Number(n) => Some(n.to_string()),
        YamlValue::Null => Some(String::new()),
        YamlValue::Tagged(tagged) => key_to_string(&tagged.value),
        YamlValue::Sequence(_) | YamlValue::Mapping(_) => None,
    }
}

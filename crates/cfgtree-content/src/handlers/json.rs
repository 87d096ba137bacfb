//! JSON format loader

use serde_json::Value;

use crate::error::{Error, Result};
use crate::format::{FormatLoader, Mapping, into_mapping, source_text};

const FORMAT: &str = "JSON";

/// Loader for JSON files
#[derive(Debug, Default)]
pub struct JsonLoader;

impl JsonLoader {
    pub fn new() -> Self {
        Self
    }
}

impl FormatLoader for JsonLoader {
    fn name(&self) -> &str {
        FORMAT
    }

    fn load(&self, source: &[u8]) -> Result<Mapping> {
        let text = source_text(FORMAT, source)?;
        let value: Value =
            serde_json::from_str(text).map_err(|e| Error::syntax(FORMAT, e.to_string()))?;
        into_mapping(FORMAT, value)
    }
}

//! Tree options
//!
//! Options are usually left at their defaults, or read from a small TOML
//! file:
//!
//! ```toml
//! default_file = ".ini"
//! disabled = ["php"]
//!
//! [aliases]
//! conf = "ini"
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use cfgtree_content::LoaderRegistry;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

fn default_file() -> String {
    ".ini".to_string()
}

/// How a configuration tree is read
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TreeOptions {
    /// Exact child name whose content seeds a container's keys
    #[serde(default = "default_file")]
    pub default_file: String,

    /// Extra type tags routed to the loader of an existing tag
    #[serde(default)]
    pub aliases: BTreeMap<String, String>,

    /// Type tags that load as empty
    #[serde(default)]
    pub disabled: Vec<String>,
}

impl Default for TreeOptions {
    fn default() -> Self {
        Self {
            default_file: default_file(),
            aliases: BTreeMap::new(),
            disabled: Vec::new(),
        }
    }
}

impl TreeOptions {
    /// Parse options from TOML content
    ///
    /// # Example
    ///
    /// ```
    /// use cfgtree_core::TreeOptions;
    ///
    /// let options = TreeOptions::parse(r#"
    /// disabled = ["php"]
    ///
    /// [aliases]
    /// conf = "ini"
    /// "#).unwrap();
    ///
    /// assert_eq!(options.default_file, ".ini");
    /// assert_eq!(options.aliases["conf"], "ini");
    /// ```
    pub fn parse(content: &str) -> Result<Self> {
        let options: TreeOptions = toml::from_str(content)?;
        Ok(options)
    }

    /// Read options from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| cfgtree_fs::Error::io(path, e))?;
        Self::parse(&content).map_err(|e| Error::Options {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Build the loader registry: built-in formats, plus aliases, minus
    /// disabled tags.
    ///
    /// Aliases are applied in tag order and may point at an alias applied
    /// before them. Disabling a tag does not disable aliases of it.
    pub fn registry(&self) -> Result<LoaderRegistry> {
        let mut registry = LoaderRegistry::with_builtins();

        for (tag, target) in &self.aliases {
            if !registry.alias(tag.as_str(), target) {
                return Err(Error::UnknownAlias {
                    tag: tag.clone(),
                    target: target.clone(),
                });
            }
        }
        for tag in &self.disabled {
            if registry.unregister(tag).is_none() {
                tracing::debug!(tag = %tag, "Disabled type tag had no loader");
            }
        }

        Ok(registry)
    }
}

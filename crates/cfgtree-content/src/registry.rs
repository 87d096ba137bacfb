//! Type tag to loader dispatch

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use cfgtree_fs::Resource;

use crate::error::Result;
use crate::format::{Format, FormatLoader, Mapping};

/// Maps resource type tags to loaders.
///
/// Tags are matched case-insensitively. A resource whose tag has no loader
/// loads as an empty mapping: unknown formats are inert, while a known
/// format with broken content is an error.
#[derive(Clone, Default)]
pub struct LoaderRegistry {
    loaders: HashMap<String, Arc<dyn FormatLoader>>,
}

impl LoaderRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with every built-in [`Format`] registered under
    /// its tags
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for format in Format::ALL {
            let loader = format.loader();
            for tag in format.tags() {
                registry.register(*tag, Arc::clone(&loader));
            }
        }
        registry
    }

    /// Register (or replace) the loader for a tag
    pub fn register(&mut self, tag: impl Into<String>, loader: Arc<dyn FormatLoader>) {
        self.loaders.insert(tag.into().to_lowercase(), loader);
    }

    /// Route `tag` to the loader already registered for `target`.
    ///
    /// Returns `false` when `target` has no loader.
    pub fn alias(&mut self, tag: impl Into<String>, target: &str) -> bool {
        match self.get(target).cloned() {
            Some(loader) => {
                self.register(tag, loader);
                true
            }
            None => false,
        }
    }

    /// Remove a tag, making resources of that type inert
    pub fn unregister(&mut self, tag: &str) -> Option<Arc<dyn FormatLoader>> {
        self.loaders.remove(&tag.to_lowercase())
    }

    /// Get the loader for a tag
    pub fn get(&self, tag: &str) -> Option<&Arc<dyn FormatLoader>> {
        self.loaders.get(&tag.to_lowercase())
    }

    /// Check if a tag has a loader
    pub fn contains(&self, tag: &str) -> bool {
        self.get(tag).is_some()
    }

    /// Registered tags, sorted
    pub fn tags(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = self.loaders.keys().map(String::as_str).collect();
        tags.sort_unstable();
        tags
    }

    /// Number of registered tags
    pub fn len(&self) -> usize {
        self.loaders.len()
    }

    /// Check if no tags are registered
    pub fn is_empty(&self) -> bool {
        self.loaders.is_empty()
    }

    /// Load a leaf resource with the loader for its type tag.
    pub fn load(&self, resource: &dyn Resource) -> Result<Mapping> {
        let tag = resource.type_tag();
        let Some(loader) = self.get(tag) else {
            tracing::debug!(path = %resource.path(), tag, "No loader for type tag, loading as empty");
            return Ok(Mapping::new());
        };

        let content = resource.content()?;
        let mapping = loader.load(&content).map_err(|e| e.at(resource.path()))?;
        tracing::trace!(path = %resource.path(), format = loader.name(), keys = mapping.len(), "Loaded resource");
        Ok(mapping)
    }
}

impl fmt::Debug for LoaderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoaderRegistry")
            .field("tags", &self.tags())
            .finish()
    }
}

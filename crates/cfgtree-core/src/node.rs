//! Lazily resolved configuration nodes
//!
//! A [`ConfigNode`] is bound to a [`Resource`] and reads nothing until it is
//! first queried. Resolution turns the resource into a mapping of lowercase
//! keys, after which the resource is dropped and the data never changes.
//!
//! - A leaf resource is decoded by the loader registered for its type tag.
//! - A container is seeded from its default file (`.ini` unless configured
//!   otherwise), then every other child becomes a nested node under its own
//!   name, replacing a seeded key of the same name. Nested nodes stay
//!   unresolved until a lookup crosses into them.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use cfgtree_content::LoaderRegistry;
use cfgtree_fs::{FsResource, NormalizedPath, Resource, split_file_name};
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;

use crate::path::{descend, is_property_name, parse_path};
use crate::{Result, TreeOptions, Value, ValueRef};

static NULL: JsonValue = JsonValue::Null;

/// Settings shared by every node of one tree
#[derive(Debug)]
struct TreeContext {
    registry: LoaderRegistry,
    default_file: String,
}

enum NodeState {
    Unresolved(Box<dyn Resource>),
    Resolved,
}

/// A lazily resolved mapping of configuration values.
///
/// Keys are lowercase and iterate in lexical order. Lookups take
/// slash-delimited, case-insensitive paths that may cross into nested
/// nodes; each node resolves itself on first access.
///
/// # Example
///
/// ```
/// use cfgtree_core::{ConfigNode, TreeOptions};
/// use cfgtree_fs::MemoryResource;
///
/// let root = MemoryResource::container("config", [
///     MemoryResource::container("app", [
///         MemoryResource::leaf(".ini", "debug = true"),
///         MemoryResource::container("db", [
///             MemoryResource::leaf("main.json", r#"{"host": "local"}"#),
///         ]),
///     ]),
/// ]);
/// let config = ConfigNode::new(root, &TreeOptions::default()).unwrap();
///
/// assert_eq!(config.get("app/debug").unwrap().as_bool(), Some(true));
/// assert_eq!(config.get("App/DB/main/host").unwrap().as_str(), Some("local"));
/// assert!(!config.exists("app/nonexistent/key").unwrap());
/// ```
pub struct ConfigNode {
    path: NormalizedPath,
    context: Arc<TreeContext>,
    state: Mutex<NodeState>,
    data: OnceLock<BTreeMap<String, Value>>,
}

impl ConfigNode {
    /// Create the root node of a tree.
    pub fn new(resource: impl Resource + 'static, options: &TreeOptions) -> Result<Self> {
        let context = TreeContext {
            registry: options.registry()?,
            default_file: options.default_file.clone(),
        };
        Ok(Self::bind(Box::new(resource), Arc::new(context)))
    }

    /// Create the root node of a tree with a custom loader registry and the
    /// default options otherwise.
    pub fn with_registry(resource: Box<dyn Resource>, registry: LoaderRegistry) -> Self {
        let context = TreeContext {
            registry,
            default_file: TreeOptions::default().default_file,
        };
        Self::bind(resource, Arc::new(context))
    }

    /// Open a file or directory on disk with default options.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with(path, &TreeOptions::default())
    }

    /// Open a file or directory on disk.
    pub fn open_with(path: impl AsRef<Path>, options: &TreeOptions) -> Result<Self> {
        let resource = FsResource::open(path)?;
        Self::new(resource, options)
    }

    fn bind(resource: Box<dyn Resource>, context: Arc<TreeContext>) -> Self {
        Self {
            path: resource.path().clone(),
            context,
            state: Mutex::new(NodeState::Unresolved(resource)),
            data: OnceLock::new(),
        }
    }

    /// Path of the resource this node was created from.
    pub fn path(&self) -> &NormalizedPath {
        &self.path
    }

    /// Whether the node has been resolved. Never triggers resolution.
    pub fn is_resolved(&self) -> bool {
        self.data.get().is_some()
    }

    /// Resolve the node if needed and return its data.
    ///
    /// A failed resolution leaves the node unresolved; the next access
    /// tries again.
    fn data(&self) -> Result<&BTreeMap<String, Value>> {
        if let Some(data) = self.data.get() {
            return Ok(data);
        }

        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(data) = self.data.get() {
            return Ok(data);
        }

        let loaded = match &*state {
            NodeState::Unresolved(resource) => self.load(resource.as_ref())?,
            NodeState::Resolved => {
                unreachable!("node data is set before its state becomes resolved")
            }
        };
        let data = self.data.get_or_init(|| loaded);
        *state = NodeState::Resolved;
        Ok(data)
    }

    fn load(&self, resource: &dyn Resource) -> Result<BTreeMap<String, Value>> {
        let mut entries: Vec<(String, Value)> = Vec::new();

        if resource.is_container() {
            let default_file = self.context.default_file.as_str();
            let (default_name, _) = split_file_name(default_file);

            if let Some(seed) = resource.child(default_file)? {
                let mapping = self.context.registry.load(seed.as_ref())?;
                entries.extend(mapping.into_iter().map(|(key, value)| (key, Value::Data(value))));
            }

            for name in resource.children()? {
                if name == default_file || name == default_name {
                    continue;
                }
                let Some(child) = resource.child(&name)? else {
                    continue;
                };
                let node = Self::bind(child, Arc::clone(&self.context));
                entries.push((name, Value::Node(node)));
            }
        } else {
            let mapping = self.context.registry.load(resource)?;
            entries.extend(mapping.into_iter().map(|(key, value)| (key, Value::Data(value))));
        }

        let mut data = BTreeMap::new();
        for (key, value) in entries {
            data.insert(key.to_lowercase(), value);
        }

        tracing::debug!(
            path = %self.path,
            container = resource.is_container(),
            entries = data.len(),
            "Resolved config node"
        );
        Ok(data)
    }

    /// Find the value at `path`.
    ///
    /// Returns `None` when any segment is missing or the path has no
    /// segments. A present `null` is `Some`.
    pub fn find(&self, path: &str) -> Result<Option<ValueRef<'_>>> {
        tracing::trace!(node = %self.path, path, "Finding path");
        self.find_segments(&parse_path(path))
    }

    fn find_segments(&self, segments: &[String]) -> Result<Option<ValueRef<'_>>> {
        let data = self.data()?;
        let Some((first, rest)) = segments.split_first() else {
            return Ok(None);
        };
        let Some(branch) = data.get(first) else {
            return Ok(None);
        };

        match branch {
            Value::Node(node) if rest.is_empty() => Ok(Some(ValueRef::Node(node))),
            Value::Node(node) => node.find_segments(rest),
            Value::Data(value) => Ok(descend(value, rest).map(ValueRef::Data)),
        }
    }

    /// Whether a value (possibly `null`) exists at `path`.
    pub fn exists(&self, path: &str) -> Result<bool> {
        Ok(self.find(path)?.is_some())
    }

    /// The value at `path`, or `null` when it does not exist.
    pub fn get(&self, path: &str) -> Result<ValueRef<'_>> {
        Ok(self.find(path)?.unwrap_or(ValueRef::Data(&NULL)))
    }

    /// Deserialize the value at `path`. Nodes are exported first.
    pub fn get_as<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>> {
        match self.find(path)? {
            Some(value) => Ok(Some(serde_json::from_value(value.to_json()?)?)),
            None => Ok(None),
        }
    }

    /// Single key access for identifier-like names (letters, digits, `_`
    /// and `-`). Other names find nothing.
    pub fn property(&self, name: &str) -> Result<Option<ValueRef<'_>>> {
        if !is_property_name(name) {
            return Ok(None);
        }
        self.find(name)
    }

    /// Top-level keys in lexical order.
    pub fn keys(&self) -> Result<Vec<&str>> {
        Ok(self.data()?.keys().map(String::as_str).collect())
    }

    /// Top-level entries in lexical key order.
    pub fn entries(&self) -> Result<impl Iterator<Item = (&str, ValueRef<'_>)>> {
        Ok(self
            .data()?
            .iter()
            .map(|(key, value)| (key.as_str(), value.to_ref())))
    }

    /// Number of top-level keys.
    pub fn len(&self) -> Result<usize> {
        Ok(self.data()?.len())
    }

    /// Whether the node has no keys.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.data()?.is_empty())
    }

    /// Export the whole subtree as JSON, resolving every nested node.
    pub fn to_json(&self) -> Result<JsonValue> {
        let mut map = serde_json::Map::new();
        for (key, value) in self.data()? {
            map.insert(key.clone(), value.to_ref().to_json()?);
        }
        Ok(JsonValue::Object(map))
    }
}

impl fmt::Debug for ConfigNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigNode")
            .field("path", &self.path)
            .field("resolved", &self.is_resolved())
            .finish()
    }
}

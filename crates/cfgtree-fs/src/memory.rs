//! In-memory resources
//!
//! Useful for configuration bundled into a binary, unpacked from an archive,
//! or built by tests.

use std::collections::HashSet;
use std::sync::Arc;

use crate::{Error, NormalizedPath, Resource, Result, split_file_name};

#[derive(Debug, Clone)]
enum Body {
    Leaf(Arc<[u8]>),
    Container(Arc<Vec<MemoryResource>>),
}

/// A resource tree held in memory.
///
/// Children keep the order they were given in.
///
/// ```
/// use cfgtree_fs::{MemoryResource, Resource};
///
/// let root = MemoryResource::container("app", [
///     MemoryResource::leaf(".ini", "debug = true"),
///     MemoryResource::leaf("db.json", r#"{"host": "local"}"#),
/// ]);
/// assert_eq!(root.children().unwrap(), vec!["db".to_string()]);
/// ```
#[derive(Debug, Clone)]
pub struct MemoryResource {
    file_name: String,
    name: String,
    type_tag: String,
    path: NormalizedPath,
    body: Body,
}

impl MemoryResource {
    /// Create a leaf. The type tag comes from the file name's extension.
    pub fn leaf(file_name: &str, content: impl Into<Vec<u8>>) -> Self {
        let (name, type_tag) = split_file_name(file_name);
        let content: Vec<u8> = content.into();
        Self {
            file_name: file_name.to_string(),
            name: name.to_string(),
            type_tag,
            path: NormalizedPath::new(file_name),
            body: Body::Leaf(content.into()),
        }
    }

    /// Create a container holding `children`.
    pub fn container(name: &str, children: impl IntoIterator<Item = MemoryResource>) -> Self {
        Self {
            file_name: name.to_string(),
            name: name.to_string(),
            type_tag: String::new(),
            path: NormalizedPath::new(name),
            body: Body::Container(Arc::new(children.into_iter().collect())),
        }
    }

    fn nested_under(&self, parent: &NormalizedPath) -> Self {
        let mut child = self.clone();
        child.path = parent.join(&self.file_name);
        child
    }

    /// Look up a child by exact file name, then by name, with its path
    /// nested under this container.
    pub fn child_resource(&self, name: &str) -> Option<MemoryResource> {
        let entries = self.entries();
        entries
            .iter()
            .find(|entry| entry.file_name == name)
            .or_else(|| {
                entries
                    .iter()
                    .filter(|entry| !entry.is_hidden())
                    .find(|entry| entry.name == name)
            })
            .map(|entry| entry.nested_under(&self.path))
    }

    fn entries(&self) -> &[MemoryResource] {
        match &self.body {
            Body::Container(children) => children.as_slice(),
            Body::Leaf(_) => &[],
        }
    }

    fn is_hidden(&self) -> bool {
        self.file_name.starts_with('.')
    }
}

impl Resource for MemoryResource {
    fn name(&self) -> &str {
        &self.name
    }

    fn path(&self) -> &NormalizedPath {
        &self.path
    }

    fn type_tag(&self) -> &str {
        &self.type_tag
    }

    fn is_container(&self) -> bool {
        matches!(self.body, Body::Container(_))
    }

    fn children(&self) -> Result<Vec<String>> {
        let mut seen = HashSet::new();
        Ok(self
            .entries()
            .iter()
            .filter(|entry| !entry.is_hidden())
            .filter(|entry| seen.insert(entry.name.as_str()))
            .map(|entry| entry.name.clone())
            .collect())
    }

    fn child(&self, name: &str) -> Result<Option<Box<dyn Resource>>> {
        Ok(self
            .child_resource(name)
            .map(|child| Box::new(child) as Box<dyn Resource>))
    }

    fn content(&self) -> Result<Vec<u8>> {
        match &self.body {
            Body::Leaf(content) => Ok(content.to_vec()),
            Body::Container(_) => Err(Error::NotALeaf {
                path: self.path.to_native(),
            }),
        }
    }
}

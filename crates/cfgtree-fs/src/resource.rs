//! The resource provider contract

use std::fmt;

use crate::{NormalizedPath, Result};

/// A named node in a hierarchical configuration source.
///
/// Containers expose an ordered, duplicate-free set of child names and
/// hand out their children; leaves expose raw content and a type tag that
/// selects the loader used to decode it.
pub trait Resource: Send + Sync + fmt::Debug {
    /// Name used as the configuration key for this resource.
    ///
    /// For leaves this is the file name without its last extension, for
    /// containers the full name.
    fn name(&self) -> &str;

    /// Identifying path, used for logging and error reporting.
    fn path(&self) -> &NormalizedPath;

    /// Lowercase type tag of a leaf (`json`, `ini`, ...). Empty when the
    /// resource is a container or has no recognizable type.
    fn type_tag(&self) -> &str;

    /// Whether this resource has children instead of content.
    fn is_container(&self) -> bool;

    /// Ordered child names. Empty for leaves.
    fn children(&self) -> Result<Vec<String>>;

    /// Fetch a child by exact file name (`.ini`, `db.json`) or, failing
    /// that, by resource name (`db`).
    fn child(&self, name: &str) -> Result<Option<Box<dyn Resource>>>;

    /// Raw content of a leaf.
    fn content(&self) -> Result<Vec<u8>>;
}

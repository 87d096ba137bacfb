//! Error types for cfgtree-core

use std::path::PathBuf;

/// Result type for cfgtree-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or querying a configuration tree
///
/// A path that does not exist is never an error; lookups report absence
/// with `Option`.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Options file could not be interpreted
    #[error("Invalid options in {path}: {message}")]
    Options { path: PathBuf, message: String },

    /// Alias routed to a type tag that has no loader
    #[error("Alias '{tag}' points to unknown type tag '{target}'")]
    UnknownAlias { tag: String, target: String },

    // Transparent wrappers for underlying crate errors
    /// Resource error from cfgtree-fs
    #[error(transparent)]
    Fs(#[from] cfgtree_fs::Error),

    /// Loader error from cfgtree-content
    #[error(transparent)]
    Content(#[from] cfgtree_content::Error),

    /// Typed fetch failed to deserialize
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// TOML deserialization error
    #[error(transparent)]
    TomlDe(#[from] toml::de::Error),
}

//! Error types for cfgtree-fs

use std::path::PathBuf;

/// Result type for cfgtree-fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading resources
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Resource not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Resource at {path} is a container and has no content")]
    NotALeaf { path: PathBuf },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

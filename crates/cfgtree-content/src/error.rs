//! Error types for cfgtree-content

use cfgtree_fs::NormalizedPath;

/// Result type for cfgtree-content operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading a resource
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed source reported by a loader, before the resource is known
    #[error("Failed to parse {format} content: {message}")]
    Syntax { format: String, message: String },

    /// Malformed source in a specific resource
    #[error("Failed to parse {format} resource at {path}: {message}")]
    ParseError {
        path: String,
        format: String,
        message: String,
    },

    /// The resource itself could not be read
    #[error(transparent)]
    Resource(#[from] cfgtree_fs::Error),
}

impl Error {
    pub fn syntax(format: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Syntax {
            format: format.into(),
            message: message.into(),
        }
    }

    /// Attach the resource path to a loader error.
    pub fn at(self, path: &NormalizedPath) -> Self {
        match self {
            Self::Syntax { format, message } => Self::ParseError {
                path: path.to_string(),
                format,
                message,
            },
            other => other,
        }
    }

    /// Path of the resource that failed to parse, if known.
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::ParseError { path, .. } => Some(path),
            _ => None,
        }
    }
}

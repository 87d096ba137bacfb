//! Normalized path handling for resource identification

use std::path::{Path, PathBuf};

/// A path normalized to use single forward slashes internally.
///
/// Resource paths are only used to identify a resource in logs and errors,
/// so the representation is the same on every platform. Conversion to a
/// platform-native path happens at the I/O boundary.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct NormalizedPath {
    /// Internal representation always uses forward slashes
    inner: String,
}

impl NormalizedPath {
    /// Create a new NormalizedPath from any path-like input.
    ///
    /// Backslashes become forward slashes, runs of slashes collapse to one
    /// and a trailing slash is dropped (except for the root `/`).
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path_str = path.as_ref().to_string_lossy();
        let mut inner = String::with_capacity(path_str.len());
        for ch in path_str.chars() {
            let ch = if ch == '\\' { '/' } else { ch };
            if ch == '/' && inner.ends_with('/') {
                continue;
            }
            inner.push(ch);
        }
        if inner.len() > 1 && inner.ends_with('/') {
            inner.pop();
        }
        Self { inner }
    }

    /// Get the internal normalized string representation.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Convert to a platform-native PathBuf for I/O operations.
    pub fn to_native(&self) -> PathBuf {
        PathBuf::from(&self.inner)
    }

    /// Join this path with a segment.
    pub fn join(&self, segment: &str) -> Self {
        if self.inner.is_empty() {
            return Self::new(segment);
        }
        Self::new(format!("{}/{}", self.inner, segment))
    }

    /// Get the last component.
    pub fn file_name(&self) -> Option<&str> {
        self.inner.rsplit('/').next().filter(|name| !name.is_empty())
    }
}

/// Split a leaf file name into its resource name and lowercase type tag.
///
/// - `db.json` -> (`db`, `json`)
/// - `archive.tar.xml` -> (`archive.tar`, `xml`)
/// - `.ini` -> (`.ini`, `ini`)
/// - `README` -> (`README`, ``)
pub fn split_file_name(file_name: &str) -> (&str, String) {
    match file_name.rfind('.') {
        None => (file_name, String::new()),
        Some(0) => (file_name, file_name[1..].to_lowercase()),
        Some(idx) => (&file_name[..idx], file_name[idx + 1..].to_lowercase()),
    }
}

impl AsRef<Path> for NormalizedPath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.inner)
    }
}

impl std::fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl From<&str> for NormalizedPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for NormalizedPath {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<PathBuf> for NormalizedPath {
    fn from(p: PathBuf) -> Self {
        Self::new(p)
    }
}

impl From<&Path> for NormalizedPath {
    fn from(p: &Path) -> Self {
        Self::new(p)
    }
}

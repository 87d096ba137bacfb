//! [`TestTree`] builder for configuration trees on disk.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A temporary directory holding a configuration tree.
///
/// # Example
///
/// ```rust
/// use cfgtree_test_utils::TestTree;
///
/// let tree = TestTree::new();
/// tree.file("app/.ini", "debug = true")
///     .file("app/db/main.json", r#"{"host": "local"}"#);
/// assert!(tree.path("app/db/main.json").exists());
/// ```
pub struct TestTree {
    temp_dir: TempDir,
}

impl Default for TestTree {
    fn default() -> Self {
        Self::new()
    }
}

impl TestTree {
    /// Create an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Root of the tree.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Absolute path of `rel` inside the tree.
    pub fn path(&self, rel: &str) -> PathBuf {
        self.root().join(rel)
    }

    /// Write a file at `rel`, creating parent directories.
    ///
    /// # Panics
    /// Panics if the filesystem operations fail.
    pub fn file(&self, rel: &str, content: impl AsRef<[u8]>) -> &Self {
        let path = self.path(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .unwrap_or_else(|e| panic!("TestTree: failed to create {}: {e}", parent.display()));
        }
        fs::write(&path, content)
            .unwrap_or_else(|e| panic!("TestTree: failed to write {}: {e}", path.display()));
        self
    }

    /// Create an (empty) directory at `rel`.
    ///
    /// # Panics
    /// Panics if the directory cannot be created.
    pub fn dir(&self, rel: &str) -> &Self {
        let path = self.path(rel);
        fs::create_dir_all(&path)
            .unwrap_or_else(|e| panic!("TestTree: failed to create {}: {e}", path.display()));
        self
    }

    /// Remove the file at `rel`.
    ///
    /// # Panics
    /// Panics if the file cannot be removed.
    pub fn remove(&self, rel: &str) -> &Self {
        let path = self.path(rel);
        fs::remove_file(&path)
            .unwrap_or_else(|e| panic!("TestTree: failed to remove {}: {e}", path.display()));
        self
    }
}

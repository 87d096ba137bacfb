//! Filesystem-backed resources

use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use crate::{Error, NormalizedPath, Resource, Result, split_file_name};

/// A file or directory on disk.
///
/// Directories are containers. Their children are listed in lexical order
/// of file name; hidden entries (leading `.`) are not listed but can still
/// be fetched by exact name, which is how a container's default file is
/// found.
///
/// A directory is scanned once, on the first call to [`Resource::children`]
/// or [`Resource::child`]; later calls reuse that listing. Symlinked
/// directories are followed unless they lead back to the directory being
/// listed or one of its ancestors.
#[derive(Debug, Clone)]
pub struct FsResource {
    native: PathBuf,
    path: NormalizedPath,
    name: String,
    type_tag: String,
    is_dir: bool,
    /// Resolved locations of this directory and every directory above it,
    /// up to the one that was opened
    lineage: Vec<PathBuf>,
    entries: OnceLock<Vec<DirEntry>>,
}

#[derive(Debug, Clone)]
struct DirEntry {
    file_name: String,
    native: PathBuf,
    real: PathBuf,
    is_dir: bool,
}

impl FsResource {
    /// Open a file or directory as a resource.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let canonical = dunce::canonicalize(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => Error::NotFound {
                path: path.to_path_buf(),
            },
            _ => Error::io(path, e),
        })?;
        let metadata = fs::metadata(&canonical).map_err(|e| Error::io(&canonical, e))?;
        let lineage = if metadata.is_dir() {
            vec![canonical.clone()]
        } else {
            Vec::new()
        };
        Ok(Self::from_native(canonical, metadata.is_dir(), lineage))
    }

    fn from_native(native: PathBuf, is_dir: bool, lineage: Vec<PathBuf>) -> Self {
        let path = NormalizedPath::new(&native);
        let file_name = path.file_name().unwrap_or(path.as_str()).to_string();

        let (name, type_tag) = if is_dir {
            (file_name, String::new())
        } else {
            let (name, tag) = split_file_name(&file_name);
            (name.to_string(), tag)
        };

        Self {
            native,
            path,
            name,
            type_tag,
            is_dir,
            lineage,
            entries: OnceLock::new(),
        }
    }

    fn from_entry(&self, entry: &DirEntry) -> Self {
        let lineage = if entry.is_dir {
            let mut lineage = self.lineage.clone();
            lineage.push(entry.real.clone());
            lineage
        } else {
            Vec::new()
        };
        Self::from_native(entry.native.clone(), entry.is_dir, lineage)
    }

    fn entries(&self) -> Result<&[DirEntry]> {
        if let Some(entries) = self.entries.get() {
            return Ok(entries);
        }
        let scanned = self.scan()?;
        Ok(self.entries.get_or_init(|| scanned))
    }

    fn scan(&self) -> Result<Vec<DirEntry>> {
        if !self.is_dir {
            return Ok(Vec::new());
        }

        let real_dir = self.lineage.last().unwrap_or(&self.native);
        let reader = fs::read_dir(&self.native).map_err(|e| Error::io(&self.native, e))?;
        let mut entries = Vec::new();
        for entry in reader {
            let entry = entry.map_err(|e| Error::io(&self.native, e))?;
            let native = entry.path();
            let file_name = entry.file_name().to_string_lossy().into_owned();
            let is_link = entry.file_type().is_ok_and(|kind| kind.is_symlink());

            // Follows symlinks; dangling links are skipped
            let metadata = match fs::metadata(&native) {
                Ok(metadata) => metadata,
                Err(e) => {
                    tracing::warn!(path = %native.display(), error = %e, "Skipping unreadable entry");
                    continue;
                }
            };

            let real = if is_link && metadata.is_dir() {
                let resolved = match dunce::canonicalize(&native) {
                    Ok(resolved) => resolved,
                    Err(e) => {
                        tracing::warn!(path = %native.display(), error = %e, "Skipping unreadable entry");
                        continue;
                    }
                };
                if self.lineage.contains(&resolved) {
                    tracing::warn!(
                        path = %native.display(),
                        resolved = %resolved.display(),
                        "Skipping directory link into its own ancestry"
                    );
                    continue;
                }
                resolved
            } else {
                real_dir.join(&file_name)
            };

            entries.push(DirEntry {
                file_name,
                native,
                real,
                is_dir: metadata.is_dir(),
            });
        }
        entries.sort_by(|a, b| a.file_name.cmp(&b.file_name));
        tracing::trace!(path = %self.path, entries = entries.len(), "Scanned directory");
        Ok(entries)
    }

    fn entry_name(entry: &DirEntry) -> &str {
        if entry.is_dir {
            &entry.file_name
        } else {
            split_file_name(&entry.file_name).0
        }
    }

    /// Exact file name first, then the first visible entry with that base
    /// name. `entries` is sorted by file name.
    fn find_entry<'a>(entries: &'a [DirEntry], name: &str) -> Option<&'a DirEntry> {
        if let Ok(idx) = entries.binary_search_by(|entry| entry.file_name.as_str().cmp(name)) {
            return Some(&entries[idx]);
        }

        // Every file name with this base name starts with it, so they sort together
        let start = entries.partition_point(|entry| entry.file_name.as_str() < name);
        entries[start..]
            .iter()
            .take_while(|entry| entry.file_name.starts_with(name))
            .filter(|entry| !entry.file_name.starts_with('.'))
            .find(|entry| Self::entry_name(entry) == name)
    }
}

impl Resource for FsResource {
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
        self.is_dir
    }

    fn children(&self) -> Result<Vec<String>> {
        let mut seen = HashSet::new();
        let names = self
            .entries()?
            .iter()
            .filter(|entry| !entry.file_name.starts_with('.'))
            .map(Self::entry_name)
            .filter(|name| seen.insert(name.to_string()))
            .map(str::to_string)
            .collect();
        Ok(names)
    }

    fn child(&self, name: &str) -> Result<Option<Box<dyn Resource>>> {
        let entries = self.entries()?;
        Ok(Self::find_entry(entries, name)
            .map(|entry| Box::new(self.from_entry(entry)) as Box<dyn Resource>))
    }

    fn content(&self) -> Result<Vec<u8>> {
        if self.is_dir {
            return Err(Error::NotALeaf {
                path: self.native.clone(),
            });
        }
        fs::read(&self.native).map_err(|e| Error::io(&self.native, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_missing_is_not_found() {
        let temp = TempDir::new().unwrap();
        let result = FsResource::open(temp.path().join("missing"));
        assert!(matches!(result, Err(Error::NotFound { .. })));
    }

    #[test]
    fn test_file_resource_name_and_tag() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("Server.JSON");
        fs::write(&file, "{}").unwrap();

        let resource = FsResource::open(&file).unwrap();
        assert_eq!(resource.name(), "Server");
        assert_eq!(resource.type_tag(), "json");
        assert!(!resource.is_container());
        assert_eq!(resource.content().unwrap(), b"{}");
    }

    #[test]
    fn test_directory_content_is_not_a_leaf() {
        let temp = TempDir::new().unwrap();
        let resource = FsResource::open(temp.path()).unwrap();
        assert!(resource.is_container());
        assert_eq!(resource.type_tag(), "");
        assert!(matches!(resource.content(), Err(Error::NotALeaf { .. })));
    }
}

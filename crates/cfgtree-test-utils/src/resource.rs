//! Resource stubs for observing how often a tree touches its source.

use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use cfgtree_fs::{Error, MemoryResource, NormalizedPath, Resource, Result};

/// Wraps a [`MemoryResource`] and fails every read after the first.
///
/// A "read" is a call to `content()` or `children()`. Children handed out
/// by `child()` are wrapped too, each with its own budget. The number of
/// reads is shared with clones, so a test can keep a handle after giving
/// the resource away.
#[derive(Debug, Clone)]
pub struct ReadOnceResource {
    inner: MemoryResource,
    reads: Arc<AtomicUsize>,
}

impl ReadOnceResource {
    pub fn new(inner: MemoryResource) -> Self {
        Self {
            inner,
            reads: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Reads attempted so far, including rejected ones.
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    fn read(&self) -> Result<()> {
        if self.reads.fetch_add(1, Ordering::SeqCst) > 0 {
            return Err(Error::io(
                self.inner.path().to_native(),
                io::Error::other("resource read more than once"),
            ));
        }
        Ok(())
    }
}

impl Resource for ReadOnceResource {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn path(&self) -> &NormalizedPath {
        self.inner.path()
    }

    fn type_tag(&self) -> &str {
        self.inner.type_tag()
    }

    fn is_container(&self) -> bool {
        self.inner.is_container()
    }

    fn children(&self) -> Result<Vec<String>> {
        self.read()?;
        self.inner.children()
    }

    fn child(&self, name: &str) -> Result<Option<Box<dyn Resource>>> {
        let Some(child) = self.inner.child_resource(name) else {
            return Ok(None);
        };
        Ok(Some(Box::new(ReadOnceResource::new(child))))
    }

    fn content(&self) -> Result<Vec<u8>> {
        self.read()?;
        self.inner.content()
    }
}

/// A leaf whose first `failures` reads fail with an I/O error.
#[derive(Debug, Clone)]
pub struct FlakyResource {
    inner: MemoryResource,
    failures: usize,
    reads: Arc<AtomicUsize>,
}

impl FlakyResource {
    pub fn new(file_name: &str, content: &str, failures: usize) -> Self {
        Self {
            inner: MemoryResource::leaf(file_name, content),
            failures,
            reads: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Reads attempted so far, including failed ones.
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

impl Resource for FlakyResource {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn path(&self) -> &NormalizedPath {
        self.inner.path()
    }

    fn type_tag(&self) -> &str {
        self.inner.type_tag()
    }

    fn is_container(&self) -> bool {
        false
    }

    fn children(&self) -> Result<Vec<String>> {
        Ok(Vec::new())
    }

    fn child(&self, _name: &str) -> Result<Option<Box<dyn Resource>>> {
        Ok(None)
    }

    fn content(&self) -> Result<Vec<u8>> {
        if self.reads.fetch_add(1, Ordering::SeqCst) < self.failures {
            return Err(Error::io(
                self.inner.path().to_native(),
                io::Error::other("simulated read failure"),
            ));
        }
        self.inner.content()
    }
}

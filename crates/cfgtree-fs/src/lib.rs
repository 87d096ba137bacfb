//! Resource providers for cfgtree
//!
//! A resource is a named node in a hierarchical configuration source: either
//! a container with ordered children or a leaf with typed byte content. This
//! crate defines the [`Resource`] contract and ships two providers:
//!
//! - [`FsResource`] walks a directory tree on disk
//! - [`MemoryResource`] serves a tree built in memory (archives, tests)

pub mod error;
pub mod fs;
pub mod memory;
pub mod path;
pub mod resource;

pub use error::{Error, Result};
pub use fs::FsResource;
pub use memory::MemoryResource;
pub use path::{NormalizedPath, split_file_name};
pub use resource::Resource;

//! Shared test utilities for the cfgtree workspace.
//!
//! This crate provides fixtures used across crate test suites. It is a
//! dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`tree`]: [`TestTree`] builder for configuration trees on disk
//! - [`resource`]: resource stubs that observe or break reads

pub mod resource;
pub mod tree;

pub use resource::{FlakyResource, ReadOnceResource};
pub use tree::TestTree;

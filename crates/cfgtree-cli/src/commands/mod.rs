//! Command implementations for cfgtree-cli

pub mod formats;
pub mod query;

use std::path::Path;

use cfgtree_core::{ConfigNode, TreeOptions};

use crate::error::Result;

pub use formats::run_formats;
pub use query::{run_dump, run_exists, run_get, run_keys};

/// Read options from `options`, or use the defaults
pub fn load_options(options: Option<&Path>) -> Result<TreeOptions> {
    match options {
        Some(path) => Ok(TreeOptions::load(path)?),
        None => Ok(TreeOptions::default()),
    }
}

/// Open the tree rooted at `root`
pub fn open_tree(root: &Path, options: &TreeOptions) -> Result<ConfigNode> {
    tracing::debug!(root = %root.display(), default_file = %options.default_file, "Opening tree");
    Ok(ConfigNode::open_with(root, options)?)
}

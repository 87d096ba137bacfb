//! Lazy hierarchical configuration trees
//!
//! A tree of resources (directories and files) is exposed as nested
//! [`ConfigNode`]s addressed by slash-delimited, case-insensitive paths:
//!
//! - **Containers** (directories) map each child name to a nested node and
//!   take extra keys from a default file (`.ini`)
//! - **Leaves** (files) are decoded by the loader for their type tag
//! - **Resolution** happens on first access and only once per node
//!
//! # Architecture
//!
//! ```text
//!                 cfgtree-cli
//!                      |
//!                 cfgtree-core
//!                      |
//!          +-----------+-----------+
//!          |                       |
//!     cfgtree-fs           cfgtree-content
//! ```
//!
//! # Example
//!
//! With `config/app/.ini` holding `debug = true` and `config/app/db.json`
//! holding `{"host": "local"}`:
//!
//! ```no_run
//! use cfgtree_core::{ConfigNode, Result};
//!
//! fn example() -> Result<()> {
//!     let config = ConfigNode::open("config")?;
//!     if config.get("app/debug")?.as_bool() == Some(true) {
//!         println!("{}", config.get("app/db/host")?.as_str().unwrap_or("localhost"));
//!     }
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod node;
pub mod options;
pub mod path;
pub mod value;

pub use error::{Error, Result};
pub use node::ConfigNode;
pub use options::TreeOptions;
pub use path::parse_path;
pub use value::{Value, ValueRef};

//! Format loaders for cfgtree
//!
//! Every recognized configuration format is decoded into the same shape: a
//! [`Mapping`] of string keys to JSON-like values (scalars, nested mappings
//! and ordered sequences). Loaders are looked up by a resource's type tag in
//! a [`LoaderRegistry`]; unknown tags load as an empty mapping.

pub mod error;
pub mod format;
pub mod handlers;
pub mod registry;

pub use error::{Error, Result};
pub use format::{Format, FormatLoader, Mapping};
pub use handlers::{IniLoader, JsonLoader, TableLoader, TomlLoader, XmlLoader, YamlLoader};
pub use registry::LoaderRegistry;

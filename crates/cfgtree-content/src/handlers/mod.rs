//! Format loaders

mod ini;
mod json;
mod table;
mod toml;
mod xml;
mod yaml;

pub use self::ini::IniLoader;
pub use self::json::JsonLoader;
pub use self::table::TableLoader;
pub use self::toml::TomlLoader;
pub use self::xml::XmlLoader;
pub use self::yaml::YamlLoader;

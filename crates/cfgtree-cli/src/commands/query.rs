//! Read-only queries against a tree

use cfgtree_core::{ConfigNode, ValueRef};
use serde_json::Value;

use crate::error::{CliError, Result};

/// Run the get command
pub fn run_get(tree: &ConfigNode, path: &str, json: bool) -> Result<()> {
    let value = find(tree, path)?;
    println!("{}", render(&value.to_json()?, json)?);
    Ok(())
}

/// Run the exists command, returning whether the path exists
pub fn run_exists(tree: &ConfigNode, path: &str) -> Result<bool> {
    let exists = tree.exists(path)?;
    println!("{exists}");
    Ok(exists)
}

/// Run the keys command
pub fn run_keys(tree: &ConfigNode, path: Option<&str>) -> Result<()> {
    for key in keys(tree, path)? {
        println!("{key}");
    }
    Ok(())
}

/// Run the dump command
pub fn run_dump(tree: &ConfigNode, path: Option<&str>) -> Result<()> {
    let exported = match path {
        Some(path) => find(tree, path)?.to_json()?,
        None => tree.to_json()?,
    };
    println!("{}", serde_json::to_string_pretty(&exported)?);
    Ok(())
}

fn find<'a>(tree: &'a ConfigNode, path: &str) -> Result<ValueRef<'a>> {
    tree.find(path)?
        .ok_or_else(|| CliError::user(format!("No value at '{path}'")))
}

fn keys(tree: &ConfigNode, path: Option<&str>) -> Result<Vec<String>> {
    let value = match path {
        Some(path) => find(tree, path)?,
        None => return Ok(owned(tree.keys()?)),
    };

    match value {
        ValueRef::Node(node) => Ok(owned(node.keys()?)),
        ValueRef::Data(Value::Object(map)) => Ok(map.keys().cloned().collect()),
        ValueRef::Data(Value::Array(items)) => Ok((0..items.len()).map(|idx| idx.to_string()).collect()),
        ValueRef::Data(_) => Err(CliError::user(format!(
            "Value at '{}' has no keys",
            path.unwrap_or_default()
        ))),
    }
}

fn owned(keys: Vec<&str>) -> Vec<String> {
    keys.into_iter().map(str::to_string).collect()
}

/// Strings print raw unless `json` is set; mappings and sequences print as
/// indented JSON.
fn render(value: &Value, json: bool) -> Result<String> {
    Ok(match value {
        Value::String(s) if !json => s.clone(),
        Value::Object(_) | Value::Array(_) => serde_json::to_string_pretty(value)?,
        other => serde_json::to_string(other)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn render_strings_raw_unless_json() {
        assert_eq!(render(&json!("local"), false).unwrap(), "local");
        assert_eq!(render(&json!("local"), true).unwrap(), "\"local\"");
    }

    #[test]
    fn render_scalars_as_json() {
        assert_eq!(render(&json!(true), false).unwrap(), "true");
        assert_eq!(render(&json!(null), false).unwrap(), "null");
        assert_eq!(render(&json!(5432), false).unwrap(), "5432");
    }

    #[test]
    fn render_mappings_indented() {
        assert_eq!(
            render(&json!({"a": 1}), false).unwrap(),
            "{\n  \"a\": 1\n}"
        );
    }
}

//! Values stored in a configuration node

use serde_json::Value as JsonValue;

use crate::Result;
use crate::node::ConfigNode;

/// A value owned by a [`ConfigNode`].
///
/// Loader output is kept as plain data; a sub-container or file of a
/// container becomes a nested node that resolves on first access.
#[derive(Debug)]
pub enum Value {
    Data(JsonValue),
    Node(ConfigNode),
}

impl Value {
    /// Borrow as a [`ValueRef`]
    pub fn to_ref(&self) -> ValueRef<'_> {
        match self {
            Self::Data(value) => ValueRef::Data(value),
            Self::Node(node) => ValueRef::Node(node),
        }
    }
}

impl From<JsonValue> for Value {
    fn from(value: JsonValue) -> Self {
        Self::Data(value)
    }
}

impl From<ConfigNode> for Value {
    fn from(node: ConfigNode) -> Self {
        Self::Node(node)
    }
}

/// A borrowed view of a value found in a tree.
#[derive(Debug, Clone, Copy)]
pub enum ValueRef<'a> {
    Data(&'a JsonValue),
    Node(&'a ConfigNode),
}

impl<'a> ValueRef<'a> {
    /// Plain data, if this is not a node
    pub fn as_data(&self) -> Option<&'a JsonValue> {
        match *self {
            Self::Data(value) => Some(value),
            Self::Node(_) => None,
        }
    }

    /// The nested node, if this is one
    pub fn as_node(&self) -> Option<&'a ConfigNode> {
        match *self {
            Self::Node(node) => Some(node),
            Self::Data(_) => None,
        }
    }

    pub fn is_node(&self) -> bool {
        matches!(self, Self::Node(_))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Data(JsonValue::Null))
    }

    pub fn as_str(&self) -> Option<&'a str> {
        self.as_data().and_then(JsonValue::as_str)
    }

    pub fn as_bool(&self) -> Option<bool> {
        self.as_data().and_then(JsonValue::as_bool)
    }

    pub fn as_i64(&self) -> Option<i64> {
        self.as_data().and_then(JsonValue::as_i64)
    }

    pub fn as_f64(&self) -> Option<f64> {
        self.as_data().and_then(JsonValue::as_f64)
    }

    /// Export as JSON. A node is resolved recursively.
    pub fn to_json(&self) -> Result<JsonValue> {
        match self {
            Self::Data(value) => Ok((*value).clone()),
            Self::Node(node) => node.to_json(),
        }
    }
}

impl PartialEq<JsonValue> for ValueRef<'_> {
    fn eq(&self, other: &JsonValue) -> bool {
        self.as_data() == Some(other)
    }
}

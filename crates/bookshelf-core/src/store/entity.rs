//! Entity and property value types.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::types::Key;

/// A single property value.
///
/// The store models every book property as either a text value or an
/// explicit null; a null property is distinct from an absent one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// A text value.
    Text(String),
    /// An explicit null.
    Null,
}

impl Value {
    /// Returns the text content, or `None` for nulls.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            Value::Null => None,
        }
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

/// Named properties of an entity.
pub type PropertyMap = BTreeMap<String, Value>;

/// A stored record: a complete key plus named properties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    /// The entity's key.
    pub key: Key,

    /// The entity's properties.
    pub properties: PropertyMap,
}

impl Entity {
    /// Create an entity from a key and properties.
    pub fn new(key: Key, properties: PropertyMap) -> Self {
        Self { key, properties }
    }

    /// Returns the named property, if present.
    pub fn property(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }

    /// Returns the named property as text.
    ///
    /// Yields `None` when the property is absent or null.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.properties.get(name).and_then(Value::as_text)
    }
}

//! CSS Tree Data Structures
//!
//! The CSS tree maps class names to ordered property records. Each property
//! names a schema entry in `type` and carries a recursive value grammar:
//!
//! ```json
//! {
//!   "classes": {
//!     "card": {
//!       "name": "card",
//!       "properties": [
//!         { "id": "p1", "type": "display", "value": "flex" },
//!         { "id": "p2", "type": "padding", "value": { "type": "px", "value": 16 } }
//!       ]
//!     }
//!   }
//! }
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A property value: a primitive, a sequence, or a `{type, value}` wrapper.
///
/// Anything that does not fit the wrapper or sequence shapes is kept as a
/// primitive so malformed documents still load and format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Typed(TypedValue),
    List(Vec<PropertyValue>),
    Primitive(serde_json::Value),
}

/// `{type, value}` wrapper naming an input type from the schema tables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypedValue {
    #[serde(rename = "type")]
    pub value_type: String,
    pub value: Box<PropertyValue>,
}

impl PropertyValue {
    /// Plain text value
    pub fn text(value: impl Into<String>) -> Self {
        Self::Primitive(serde_json::Value::String(value.into()))
    }

    /// Wrap `value` in an input type
    pub fn typed(value_type: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        Self::Typed(TypedValue {
            value_type: value_type.into(),
            value: Box::new(value.into()),
        })
    }

    /// Empty placeholder used for freshly added properties
    pub fn empty() -> Self {
        Self::text("")
    }

    /// Literal string form, ignoring any schema
    ///
    /// Strings are unquoted, `null` is empty, sequences are comma-joined and
    /// wrappers yield the string form of their inner value.
    pub fn to_raw_string(&self) -> String {
        match self {
            PropertyValue::Primitive(value) => primitive_to_string(value),
            PropertyValue::List(items) => items
                .iter()
                .map(PropertyValue::to_raw_string)
                .collect::<Vec<_>>()
                .join(","),
            PropertyValue::Typed(typed) => typed.value.to_raw_string(),
        }
    }
}

/// String form of a JSON primitive; non-primitives serialize as compact JSON
pub fn primitive_to_string(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        Self::text(value)
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        Self::text(value)
    }
}

impl From<i32> for PropertyValue {
    fn from(value: i32) -> Self {
        Self::Primitive(serde_json::Value::from(value))
    }
}

impl From<i64> for PropertyValue {
    fn from(value: i64) -> Self {
        Self::Primitive(serde_json::Value::from(value))
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        Self::Primitive(serde_json::Value::from(value))
    }
}

impl From<Vec<PropertyValue>> for PropertyValue {
    fn from(values: Vec<PropertyValue>) -> Self {
        Self::List(values)
    }
}

/// One CSS declaration descriptor awaiting schema-driven formatting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CssProperty {
    /// Unique within the owning class
    pub id: String,

    /// Property schema name (e.g. "display", "font-size")
    #[serde(rename = "type")]
    pub property_type: String,

    pub value: PropertyValue,
}

/// A named class and its ordered declarations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CssClass {
    pub name: String,

    #[serde(default)]
    pub properties: Vec<CssProperty>,
}

impl CssClass {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: Vec::new(),
        }
    }

    pub fn property(&self, id: &str) -> Option<&CssProperty> {
        self.properties.iter().find(|p| p.id == id)
    }
}

/// Class name → class, in insertion order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CssTree {
    #[serde(default)]
    pub classes: IndexMap<String, CssClass>,
}

impl CssTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn class(&self, name: &str) -> Option<&CssClass> {
        self.classes.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.classes.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn class_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.classes.keys().map(String::as_str)
    }
}

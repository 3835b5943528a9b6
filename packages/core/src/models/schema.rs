//! CSS Schema Types
//!
//! Static, declarative descriptions of CSS properties and the value grammars
//! their inputs accept. The editor builds its property inputs from these
//! tables and the formatting engine (`crate::css`) uses the `format`
//! templates to turn structured values into CSS text.
//!
//! ## Templates
//!
//! Every template contains a `{value}` placeholder:
//!
//! - property: `"display: {value};"`
//! - input type: `"{value}px"`, `"rgb({value})"`
//!
//! ## Example Input Type
//!
//! ```json
//! {
//!   "name": "rgb",
//!   "kind": "list",
//!   "format": "rgb({value})",
//!   "separator": ", "
//! }
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::css::PropertyValue;

/// Placeholder substituted by the formatting engine
pub const VALUE_PLACEHOLDER: &str = "{value}";

/// Substitute `value` into every `{value}` placeholder of `template`
pub fn fill_template(template: &str, value: &str) -> String {
    template.replace(VALUE_PLACEHOLDER, value)
}

/// Kind of editor input an input type renders as
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    /// Fixed set of keywords (select box)
    Keyword,
    /// Unitless number
    Number,
    /// Number with a unit suffix
    Length,
    Color,
    /// Free text
    Text,
    /// Sequence of values joined by the type's separator
    List,
}

/// Editor grouping of properties
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PropertyGroup {
    Display,
    Flexbox,
    Spacing,
    Sizing,
    Typography,
    Background,
    Border,
}

/// Value grammar referenced by `{type, value}` wrappers
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InputTypeSchema {
    /// Input type name (the `type` of a wrapper)
    pub name: String,

    pub kind: InputKind,

    /// Template wrapping the formatted inner value
    pub format: String,

    /// Joins the items of a sequence inner value
    #[serde(default)]
    pub separator: String,

    /// Allowed keywords - keyword inputs only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
}

/// Description of one CSS property
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PropertySchema {
    /// Property name, also the `type` of a CSS tree property record
    pub name: String,

    /// Human-readable label for the property panel
    pub label: String,

    pub group: PropertyGroup,

    /// Declaration template, e.g. `"margin: {value};"`
    pub format: String,

    /// Input types the editor offers for this property, first is preferred
    pub inputs: Vec<String>,

    /// Placeholder value for newly added properties
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<PropertyValue>,
}

/// Lookup tables for property schemas and input types
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchemaRegistry {
    properties: IndexMap<String, PropertySchema>,
    input_types: IndexMap<String, InputTypeSchema>,
}

impl SchemaRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry preloaded with the core tables
    pub fn core() -> Self {
        let mut registry = Self::new();
        for input in super::core_schemas::get_core_input_types() {
            registry.register_input_type(input);
        }
        for property in super::core_schemas::get_core_property_schemas() {
            registry.register_property(property);
        }
        registry
    }

    /// Add or replace a property schema
    pub fn register_property(&mut self, schema: PropertySchema) {
        self.properties.insert(schema.name.clone(), schema);
    }

    /// Add or replace an input type
    pub fn register_input_type(&mut self, schema: InputTypeSchema) {
        self.input_types.insert(schema.name.clone(), schema);
    }

    pub fn property(&self, name: &str) -> Option<&PropertySchema> {
        self.properties.get(name)
    }

    pub fn input_type(&self, name: &str) -> Option<&InputTypeSchema> {
        self.input_types.get(name)
    }

    pub fn properties(&self) -> impl Iterator<Item = &PropertySchema> + '_ {
        self.properties.values()
    }

    pub fn input_types(&self) -> impl Iterator<Item = &InputTypeSchema> + '_ {
        self.input_types.values()
    }

    /// Properties of one editor group, in table order
    pub fn properties_in_group(
        &self,
        group: PropertyGroup,
    ) -> impl Iterator<Item = &PropertySchema> + '_ {
        self.properties.values().filter(move |p| p.group == group)
    }

    /// Groups in first-appearance order
    pub fn groups(&self) -> Vec<PropertyGroup> {
        let mut groups = Vec::new();
        for property in self.properties.values() {
            if !groups.contains(&property.group) {
                groups.push(property.group);
            }
        }
        groups
    }

    /// Input types accepted by a property, skipping names with no table entry
    pub fn inputs_for(&self, property: &str) -> Vec<&InputTypeSchema> {
        self.property(property)
            .map(|p| {
                p.inputs
                    .iter()
                    .filter_map(|name| self.input_type(name))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Keyword options of an input type (empty for non-keyword inputs)
    pub fn options_for(&self, input: &str) -> &[String] {
        self.input_type(input)
            .and_then(|i| i.options.as_deref())
            .unwrap_or_default()
    }
}

//! Schema-driven value formatting
//!
//! Turns a structured [`PropertyValue`] into CSS value text. The function is
//! total: unknown input types and odd shapes degrade to their literal string
//! form instead of failing, so a malformed document still renders.

use crate::models::{fill_template, primitive_to_string, PropertyValue, SchemaRegistry};

/// Format `value` for a declaration of `property_type`.
///
/// - primitives yield their string form
/// - sequences format each item and concatenate them
/// - `{type, value}` wrappers format the inner value (a sequence joined by
///   the input type's separator) and fill the input type's template; an
///   unknown type yields the inner value's raw string
///
/// # Example
///
/// ```rust
/// use mixa_core::css::format_property;
/// use mixa_core::models::{PropertyValue, SchemaRegistry};
///
/// let schemas = SchemaRegistry::core();
/// let value = PropertyValue::typed("px", 16);
/// assert_eq!(format_property(&value, "width", &schemas), "16px");
/// ```
pub fn format_property(
    value: &PropertyValue,
    property_type: &str,
    schemas: &SchemaRegistry,
) -> String {
    format_value(value, "", property_type, schemas)
}

fn format_value(
    value: &PropertyValue,
    separator: &str,
    property_type: &str,
    schemas: &SchemaRegistry,
) -> String {
    match value {
        PropertyValue::Primitive(primitive) => primitive_to_string(primitive),
        PropertyValue::List(items) => items
            .iter()
            .map(|item| format_value(item, "", property_type, schemas))
            .collect::<Vec<_>>()
            .join(separator),
        PropertyValue::Typed(typed) => match schemas.input_type(&typed.value_type) {
            Some(input) => {
                let inner = format_value(&typed.value, &input.separator, property_type, schemas);
                fill_template(&input.format, &inner)
            }
            None => {
                tracing::trace!(
                    "Unknown input type '{}' in {}, using raw value",
                    typed.value_type,
                    property_type
                );
                typed.value.to_raw_string()
            }
        },
    }
}

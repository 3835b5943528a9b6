//! Core Schema Definitions
//!
//! This module contains the canonical CSS schema tables shipped with Mixa.
//!
//! ## Groups
//!
//! - **display** - display, position, overflow
//! - **flexbox** - direction, wrap, alignment, gap
//! - **spacing** - margin, padding
//! - **sizing** - width/height and their bounds
//! - **typography** - font, line, text and color properties
//! - **background** - background color
//! - **border** - width, style, color, radius
//!
//! ## Usage
//!
//! Call `SchemaRegistry::core()` rather than using these vectors directly.

use crate::models::css::PropertyValue;
use crate::models::schema::{InputKind, InputTypeSchema, PropertyGroup, PropertySchema};

fn keyword(name: &str, options: &[&str]) -> InputTypeSchema {
    InputTypeSchema {
        name: name.to_string(),
        kind: InputKind::Keyword,
        format: "{value}".to_string(),
        separator: String::new(),
        options: Some(options.iter().map(|o| o.to_string()).collect()),
    }
}

fn unit(name: &str, kind: InputKind, suffix: &str) -> InputTypeSchema {
    InputTypeSchema {
        name: name.to_string(),
        kind,
        format: format!("{{value}}{suffix}"),
        separator: " ".to_string(),
        options: None,
    }
}

fn list(name: &str, format: &str, separator: &str) -> InputTypeSchema {
    InputTypeSchema {
        name: name.to_string(),
        kind: InputKind::List,
        format: format.to_string(),
        separator: separator.to_string(),
        options: None,
    }
}

fn property(
    name: &str,
    label: &str,
    group: PropertyGroup,
    inputs: &[&str],
    default: Option<PropertyValue>,
) -> PropertySchema {
    PropertySchema {
        name: name.to_string(),
        label: label.to_string(),
        group,
        format: format!("{name}: {{value}};"),
        inputs: inputs.iter().map(|i| i.to_string()).collect(),
        default,
    }
}

const LENGTHS: &[&str] = &["px", "rem", "em", "percent", "vw", "vh", "auto"];

/// Get all core input types
pub fn get_core_input_types() -> Vec<InputTypeSchema> {
    vec![
        // Keyword grammars
        keyword(
            "display",
            &[
                "block",
                "inline",
                "inline-block",
                "flex",
                "inline-flex",
                "grid",
                "contents",
                "none",
            ],
        ),
        keyword(
            "position",
            &["static", "relative", "absolute", "fixed", "sticky"],
        ),
        keyword("overflow", &["visible", "hidden", "scroll", "auto", "clip"]),
        keyword(
            "flex-direction",
            &["row", "row-reverse", "column", "column-reverse"],
        ),
        keyword("flex-wrap", &["nowrap", "wrap", "wrap-reverse"]),
        keyword(
            "justify",
            &[
                "flex-start",
                "flex-end",
                "center",
                "space-between",
                "space-around",
                "space-evenly",
            ],
        ),
        keyword(
            "align",
            &["stretch", "flex-start", "flex-end", "center", "baseline"],
        ),
        keyword("text-align", &["left", "right", "center", "justify"]),
        keyword(
            "text-transform",
            &["none", "uppercase", "lowercase", "capitalize"],
        ),
        keyword("font-weight", &["normal", "bold", "lighter", "bolder"]),
        keyword("font-style", &["normal", "italic", "oblique"]),
        keyword(
            "border-style",
            &["none", "solid", "dashed", "dotted", "double"],
        ),
        keyword("auto", &["auto"]),
        // Units
        unit("px", InputKind::Length, "px"),
        unit("rem", InputKind::Length, "rem"),
        unit("em", InputKind::Length, "em"),
        unit("percent", InputKind::Length, "%"),
        unit("vw", InputKind::Length, "vw"),
        unit("vh", InputKind::Length, "vh"),
        unit("number", InputKind::Number, ""),
        // Colors
        unit("hex", InputKind::Color, ""),
        list("rgb", "rgb({value})", ", "),
        list("rgba", "rgba({value})", ", "),
        unit("color", InputKind::Color, ""),
        // Free text and sequences
        unit("text", InputKind::Text, ""),
        list("multiple", "{value}", " "),
        list("font-stack", "{value}", ", "),
    ]
}

/// Get all core property schemas
pub fn get_core_property_schemas() -> Vec<PropertySchema> {
    use PropertyGroup::*;

    let spacing: &[&str] = &["px", "rem", "em", "percent", "auto", "multiple"];
    let colors: &[&str] = &["hex", "rgb", "rgba", "color"];

    vec![
        property(
            "display",
            "Display",
            Display,
            &["display"],
            Some(PropertyValue::text("block")),
        ),
        property(
            "position",
            "Position",
            Display,
            &["position"],
            Some(PropertyValue::text("static")),
        ),
        property("overflow", "Overflow", Display, &["overflow"], None),
        property(
            "flex-direction",
            "Direction",
            Flexbox,
            &["flex-direction"],
            Some(PropertyValue::text("row")),
        ),
        property("flex-wrap", "Wrap", Flexbox, &["flex-wrap"], None),
        property("justify-content", "Justify", Flexbox, &["justify"], None),
        property("align-items", "Align", Flexbox, &["align"], None),
        property("gap", "Gap", Flexbox, &["px", "rem", "em", "multiple"], None),
        property("margin", "Margin", Spacing, spacing, None),
        property("padding", "Padding", Spacing, spacing, None),
        property("width", "Width", Sizing, LENGTHS, None),
        property("height", "Height", Sizing, LENGTHS, None),
        property("min-width", "Min Width", Sizing, LENGTHS, None),
        property("max-width", "Max Width", Sizing, LENGTHS, None),
        property("min-height", "Min Height", Sizing, LENGTHS, None),
        property("max-height", "Max Height", Sizing, LENGTHS, None),
        property("font-family", "Font", Typography, &["font-stack", "text"], None),
        property(
            "font-size",
            "Size",
            Typography,
            &["px", "rem", "em", "percent"],
            Some(PropertyValue::typed("px", 16)),
        ),
        property(
            "font-weight",
            "Weight",
            Typography,
            &["font-weight", "number"],
            None,
        ),
        property("font-style", "Style", Typography, &["font-style"], None),
        property(
            "line-height",
            "Line Height",
            Typography,
            &["number", "px", "rem", "em", "percent"],
            None,
        ),
        property(
            "letter-spacing",
            "Letter Spacing",
            Typography,
            &["px", "rem", "em"],
            None,
        ),
        property("text-align", "Align", Typography, &["text-align"], None),
        property(
            "text-transform",
            "Transform",
            Typography,
            &["text-transform"],
            None,
        ),
        property("color", "Color", Typography, colors, None),
        property("background-color", "Color", Background, colors, None),
        property("border-width", "Width", Border, &["px", "multiple"], None),
        property("border-style", "Style", Border, &["border-style"], None),
        property("border-color", "Color", Border, colors, None),
        property(
            "border-radius",
            "Radius",
            Border,
            &["px", "rem", "percent", "multiple"],
            None,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_core_property_names_unique() {
        let schemas = get_core_property_schemas();
        let names: HashSet<&str> = schemas.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names.len(), schemas.len());
    }

    #[test]
    fn test_core_inputs_resolve() {
        let inputs: HashSet<String> = get_core_input_types()
            .into_iter()
            .map(|i| i.name)
            .collect();

        for schema in get_core_property_schemas() {
            assert!(
                schema.format.contains("{value}"),
                "{} has no placeholder",
                schema.name
            );
            for input in &schema.inputs {
                assert!(
                    inputs.contains(input),
                    "{} references unknown input type {}",
                    schema.name,
                    input
                );
            }
        }
    }

    #[test]
    fn test_keyword_inputs_have_options() {
        for input in get_core_input_types() {
            if input.kind == InputKind::Keyword {
                assert!(
                    input.options.as_ref().is_some_and(|o| !o.is_empty()),
                    "{} has no options",
                    input.name
                );
            }
        }
    }

    #[test]
    fn test_display_format() {
        let display = get_core_property_schemas()
            .into_iter()
            .find(|s| s.name == "display")
            .unwrap();
        assert_eq!(display.format, "display: {value};");
        assert_eq!(display.group, PropertyGroup::Display);
    }
}

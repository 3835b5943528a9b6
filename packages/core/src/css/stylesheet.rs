//! CSS generation from a `CssTree`.
//!
//! Each class becomes one rule body: its declarations, in property order,
//! rendered through the property schema's template and joined by a space.

use serde::{Deserialize, Serialize};
use std::fmt::Write;

use crate::css::format_property;
use crate::models::{fill_template, CssClass, CssTree, SchemaRegistry};

/// Generated rule body for one class
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassCss {
    pub class_name: String,

    #[serde(rename = "cssString")]
    pub css: String,
}

/// Render the declarations of `class` as a single rule body.
///
/// Properties with no schema entry, or whose value formats to nothing (such
/// as a fresh placeholder), are skipped.
pub fn generate_class_css(class: &CssClass, schemas: &SchemaRegistry) -> String {
    let mut declarations = Vec::with_capacity(class.properties.len());

    for property in &class.properties {
        let Some(schema) = schemas.property(&property.property_type) else {
            tracing::trace!(
                "Skipping unknown property type '{}' in .{}",
                property.property_type,
                class.name
            );
            continue;
        };

        let value = format_property(&property.value, &property.property_type, schemas);
        if value.trim().is_empty() {
            continue;
        }
        declarations.push(fill_template(&schema.format, &value));
    }

    declarations.join(" ")
}

/// One [`ClassCss`] per class, in class order
pub fn generate_css_from_tree(tree: &CssTree, schemas: &SchemaRegistry) -> Vec<ClassCss> {
    tree.classes
        .iter()
        .map(|(name, class)| ClassCss {
            class_name: name.clone(),
            css: generate_class_css(class, schemas),
        })
        .collect()
}

/// Full stylesheet text: one `.name { body }` rule per non-empty class
///
/// # Example
///
/// ```rust
/// use mixa_core::css::render_stylesheet;
/// use mixa_core::models::{CssTree, SchemaRegistry};
/// use mixa_core::operations::{add_class, add_property, update_property, PropertyPatch};
///
/// let (tree, _) = add_class(&CssTree::new(), Some("card"));
/// let (tree, id) = add_property(&tree, "card", "display");
/// let tree = update_property(&tree, "card", &id.unwrap(), PropertyPatch::value("flex"));
///
/// assert_eq!(
///     render_stylesheet(&tree, &SchemaRegistry::core()),
///     ".card { display: flex; }"
/// );
/// ```
pub fn render_stylesheet(tree: &CssTree, schemas: &SchemaRegistry) -> String {
    let mut stylesheet = String::new();

    for rule in generate_css_from_tree(tree, schemas) {
        if rule.css.is_empty() {
            continue;
        }
        if !stylesheet.is_empty() {
            stylesheet.push('\n');
        }
        // Writing to a String cannot fail
        let _ = write!(stylesheet, ".{} {{ {} }}", rule.class_name, rule.css);
    }

    stylesheet
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> CssTree {
        serde_json::from_str(
            r#"{
                "classes": {
                    "hero": {
                        "name": "hero",
                        "properties": [
                            { "id": "1", "type": "display", "value": "flex" },
                            { "id": "2", "type": "padding", "value": {
                                "type": "multiple",
                                "value": [
                                    { "type": "px", "value": 8 },
                                    { "type": "rem", "value": 2 }
                                ]
                            } },
                            { "id": "3", "type": "no-such-property", "value": "x" },
                            { "id": "4", "type": "color", "value": { "type": "rgb", "value": [1, 2, 3] } },
                            { "id": "5", "type": "margin", "value": "" }
                        ]
                    },
                    "empty": { "name": "empty", "properties": [] },
                    "alert": {
                        "name": "alert",
                        "properties": [
                            { "id": "1", "type": "font-weight", "value": "bold" }
                        ]
                    }
                }
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_generate_class_css() {
        let tree = tree();
        let css = generate_class_css(tree.class("hero").unwrap(), &SchemaRegistry::core());
        assert_eq!(
            css,
            "display: flex; padding: 8px 2rem; color: rgb(1, 2, 3);"
        );
    }

    #[test]
    fn test_single_display_declaration() {
        let class: CssClass = serde_json::from_str(
            r#"{ "name": "x", "properties": [ { "id": "a", "type": "display", "value": "flex" } ] }"#,
        )
        .unwrap();
        let css = generate_class_css(&class, &SchemaRegistry::core());
        assert!(css.contains("display: flex;"));
    }

    #[test]
    fn test_typed_values_with_empty_inner_are_kept() {
        let class: CssClass = serde_json::from_str(
            r#"{ "name": "x", "properties": [
                { "id": "a", "type": "color", "value": { "type": "rgb", "value": [] } },
                { "id": "b", "type": "margin", "value": { "type": "px", "value": "" } },
                { "id": "c", "type": "padding", "value": "" }
            ] }"#,
        )
        .unwrap();
        let css = generate_class_css(&class, &SchemaRegistry::core());
        assert_eq!(css, "color: rgb(); margin: px;");
    }

    #[test]
    fn test_generate_css_from_tree_keeps_class_order() {
        let rules = generate_css_from_tree(&tree(), &SchemaRegistry::core());
        let names: Vec<&str> = rules.iter().map(|r| r.class_name.as_str()).collect();
        assert_eq!(names, vec!["hero", "empty", "alert"]);
        assert_eq!(rules[1].css, "");
        assert_eq!(rules[2].css, "font-weight: bold;");
    }

    #[test]
    fn test_render_stylesheet_skips_empty_classes() {
        let css = render_stylesheet(&tree(), &SchemaRegistry::core());
        assert_eq!(
            css,
            ".hero { display: flex; padding: 8px 2rem; color: rgb(1, 2, 3); }\n\
             .alert { font-weight: bold; }"
        );
        assert_eq!(render_stylesheet(&CssTree::new(), &SchemaRegistry::core()), "");
    }

    #[test]
    fn test_class_css_wire_shape() {
        let rule = ClassCss {
            class_name: "hero".to_string(),
            css: "display: flex;".to_string(),
        };
        let json = serde_json::to_value(&rule).unwrap();
        assert_eq!(json["className"], "hero");
        assert_eq!(json["cssString"], "display: flex;");
    }
}

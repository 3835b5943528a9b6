//! CSS tree store
//!
//! Class and property editing as pure functions: each takes the current
//! `CssTree` snapshot and returns a new one. A missing class or property
//! returns the input unchanged.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{CssClass, CssProperty, CssTree, PropertyValue, SchemaRegistry};

/// Prefix of generated class names
pub const DEFAULT_CLASS_PREFIX: &str = "mx-";

/// Number of random hex characters in a generated class name
pub const DEFAULT_CLASS_ID_LENGTH: usize = 6;

/// Partial update of a property record; `None` fields are left as they are
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertyPatch {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub property_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<PropertyValue>,
}

impl PropertyPatch {
    pub fn value(value: impl Into<PropertyValue>) -> Self {
        Self {
            property_type: None,
            value: Some(value.into()),
        }
    }

    pub fn property_type(property_type: impl Into<String>) -> Self {
        Self {
            property_type: Some(property_type.into()),
            value: None,
        }
    }
}

/// Random class name such as `mx-3f9a1c`
pub fn generate_class_name(prefix: &str, length: usize) -> String {
    let hex = Uuid::new_v4().simple().to_string();
    let length = length.clamp(1, hex.len());
    format!("{}{}", prefix, &hex[..length])
}

/// Add a class named `name`, or a generated `mx-xxxxxx` name when `None`.
///
/// Returns the new tree and the class name. An existing name is a no-op.
pub fn add_class(tree: &CssTree, name: Option<&str>) -> (CssTree, String) {
    add_class_with_prefix(tree, name, DEFAULT_CLASS_PREFIX, DEFAULT_CLASS_ID_LENGTH)
}

/// [`add_class`] with an explicit generated-name prefix and length
pub fn add_class_with_prefix(
    tree: &CssTree,
    name: Option<&str>,
    prefix: &str,
    length: usize,
) -> (CssTree, String) {
    let name = match name.map(str::trim).filter(|n| !n.is_empty()) {
        Some(name) => name.to_string(),
        None => {
            let mut generated = generate_class_name(prefix, length);
            while tree.contains(&generated) {
                generated = generate_class_name(prefix, length);
            }
            generated
        }
    };

    if tree.contains(&name) {
        tracing::debug!("Class {} already exists", name);
        return (tree.clone(), name);
    }

    let mut next = tree.clone();
    next.classes.insert(name.clone(), CssClass::new(name.clone()));
    (next, name)
}

pub fn remove_class(tree: &CssTree, name: &str) -> CssTree {
    let mut next = tree.clone();
    if next.classes.shift_remove(name).is_none() {
        tracing::debug!("Class {} not found, nothing removed", name);
    }
    next
}

/// Rename `old` to `new` keeping its position.
///
/// No-op when `old` is missing, `new` is empty or `new` already exists.
pub fn update_class(tree: &CssTree, old: &str, new: &str) -> CssTree {
    let new = new.trim();
    if !tree.contains(old) || new.is_empty() || tree.contains(new) {
        tracing::debug!("Skipping rename of class {} to {}", old, new);
        return tree.clone();
    }

    let classes = tree
        .classes
        .iter()
        .map(|(name, class)| {
            if name == old {
                let mut renamed = class.clone();
                renamed.name = new.to_string();
                (new.to_string(), renamed)
            } else {
                (name.clone(), class.clone())
            }
        })
        .collect();

    CssTree { classes }
}

/// Append a property of `property_type` with an empty placeholder value.
///
/// Returns the new tree and the generated property id (`None` when the class
/// does not exist).
pub fn add_property(
    tree: &CssTree,
    class_name: &str,
    property_type: &str,
) -> (CssTree, Option<String>) {
    add_property_with(tree, class_name, property_type, None)
}

/// [`add_property`] using the schema's default as the placeholder when known
pub fn add_property_with(
    tree: &CssTree,
    class_name: &str,
    property_type: &str,
    schemas: Option<&SchemaRegistry>,
) -> (CssTree, Option<String>) {
    if !tree.contains(class_name) {
        tracing::debug!("Class {} not found, property not added", class_name);
        return (tree.clone(), None);
    }

    let value = schemas
        .and_then(|s| s.property(property_type))
        .and_then(|schema| schema.default.clone())
        .unwrap_or_else(PropertyValue::empty);

    let mut next = tree.clone();
    let mut id = Uuid::new_v4().to_string();
    if let Some(class) = next.classes.get_mut(class_name) {
        while class.property(&id).is_some() {
            id = Uuid::new_v4().to_string();
        }
        class.properties.push(CssProperty {
            id: id.clone(),
            property_type: property_type.to_string(),
            value,
        });
    }
    (next, Some(id))
}

pub fn update_property(
    tree: &CssTree,
    class_name: &str,
    property_id: &str,
    patch: PropertyPatch,
) -> CssTree {
    let mut next = tree.clone();
    let property = next
        .classes
        .get_mut(class_name)
        .and_then(|class| class.properties.iter_mut().find(|p| p.id == property_id));

    match property {
        Some(property) => {
            if let Some(property_type) = patch.property_type {
                property.property_type = property_type;
            }
            if let Some(value) = patch.value {
                property.value = value;
            }
        }
        None => tracing::debug!("Property {}.{} not found", class_name, property_id),
    }
    next
}

pub fn delete_property(tree: &CssTree, class_name: &str, property_id: &str) -> CssTree {
    let mut next = tree.clone();
    if let Some(class) = next.classes.get_mut(class_name) {
        class.properties.retain(|p| p.id != property_id);
    }
    next
}

/// Move a declaration to `to_index` (clamped to the last position)
pub fn move_property(
    tree: &CssTree,
    class_name: &str,
    property_id: &str,
    to_index: usize,
) -> CssTree {
    let mut next = tree.clone();
    if let Some(class) = next.classes.get_mut(class_name) {
        if let Some(from) = class.properties.iter().position(|p| p.id == property_id) {
            let property = class.properties.remove(from);
            let to = to_index.min(class.properties.len());
            class.properties.insert(to, property);
        }
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree_with_card() -> (CssTree, String, String) {
        let (tree, _) = add_class(&CssTree::new(), Some("card"));
        let (tree, first) = add_property(&tree, "card", "display");
        let (tree, second) = add_property(&tree, "card", "padding");
        (tree, first.unwrap(), second.unwrap())
    }

    #[test]
    fn test_add_class_generates_distinct_names() {
        let (tree, a) = add_class(&CssTree::new(), None);
        let (tree, b) = add_class(&tree, None);

        assert_ne!(a, b);
        assert_eq!(tree.len(), 2);
        assert!(a.starts_with("mx-"));
        assert_eq!(a.len(), 3 + DEFAULT_CLASS_ID_LENGTH);
        assert_eq!(tree.class(&a).unwrap().name, a);
    }

    #[test]
    fn test_add_existing_class_is_noop() {
        let (tree, _, _) = tree_with_card();
        let (next, name) = add_class(&tree, Some("card"));
        assert_eq!(name, "card");
        assert_eq!(next, tree);
    }

    #[test]
    fn test_add_class_with_prefix() {
        let (tree, name) = add_class_with_prefix(&CssTree::new(), None, "ui-", 4);
        assert!(name.starts_with("ui-"));
        assert_eq!(name.len(), 7);
        assert!(tree.contains(&name));
    }

    #[test]
    fn test_remove_class() {
        let (tree, _, _) = tree_with_card();
        let next = remove_class(&tree, "card");
        assert!(next.is_empty());
        assert_eq!(tree.len(), 1);
        assert_eq!(remove_class(&next, "card"), next);
    }

    #[test]
    fn test_update_class_keeps_position() {
        let (tree, _) = add_class(&CssTree::new(), Some("a"));
        let (tree, _) = add_class(&tree, Some("b"));
        let (tree, _) = add_class(&tree, Some("c"));

        let next = update_class(&tree, "b", "hero");
        assert_eq!(next.class_names().collect::<Vec<_>>(), vec!["a", "hero", "c"]);
        assert_eq!(next.class("hero").unwrap().name, "hero");

        // Collision and missing source are no-ops
        assert_eq!(update_class(&tree, "a", "c"), tree);
        assert_eq!(update_class(&tree, "zzz", "d"), tree);
        assert_eq!(update_class(&tree, "a", "  "), tree);
    }

    #[test]
    fn test_add_property_placeholder() {
        let (tree, first, second) = tree_with_card();
        let card = tree.class("card").unwrap();

        assert_ne!(first, second);
        assert_eq!(card.properties.len(), 2);
        assert_eq!(card.properties[0].property_type, "display");
        assert_eq!(card.properties[0].value, PropertyValue::empty());
    }

    #[test]
    fn test_add_property_uses_schema_default() {
        let registry = SchemaRegistry::core();
        let (tree, _) = add_class(&CssTree::new(), Some("card"));
        let (tree, id) = add_property_with(&tree, "card", "display", Some(&registry));

        let property = tree.class("card").unwrap().property(&id.unwrap()).unwrap();
        assert_eq!(property.value, PropertyValue::text("block"));
    }

    #[test]
    fn test_add_property_missing_class() {
        let tree = CssTree::new();
        let (next, id) = add_property(&tree, "ghost", "display");
        assert!(id.is_none());
        assert_eq!(next, tree);
    }

    #[test]
    fn test_update_property_partial() {
        let (tree, first, _) = tree_with_card();

        let next = update_property(&tree, "card", &first, PropertyPatch::value("flex"));
        let property = next.class("card").unwrap().property(&first).unwrap();
        assert_eq!(property.property_type, "display");
        assert_eq!(property.value, PropertyValue::text("flex"));

        let next = update_property(&next, "card", &first, PropertyPatch::property_type("position"));
        let property = next.class("card").unwrap().property(&first).unwrap();
        assert_eq!(property.property_type, "position");
        assert_eq!(property.value, PropertyValue::text("flex"));

        // Original snapshot untouched
        assert_eq!(
            tree.class("card").unwrap().property(&first).unwrap().value,
            PropertyValue::empty()
        );
    }

    #[test]
    fn test_update_missing_property_is_noop() {
        let (tree, _, _) = tree_with_card();
        assert_eq!(
            update_property(&tree, "card", "ghost", PropertyPatch::value("x")),
            tree
        );
        assert_eq!(
            update_property(&tree, "ghost", "ghost", PropertyPatch::value("x")),
            tree
        );
    }

    #[test]
    fn test_delete_property() {
        let (tree, first, second) = tree_with_card();
        let next = delete_property(&tree, "card", &first);
        let card = next.class("card").unwrap();
        assert_eq!(card.properties.len(), 1);
        assert_eq!(card.properties[0].id, second);
        assert_eq!(delete_property(&next, "card", &first), next);
    }

    #[test]
    fn test_move_property() {
        let (tree, first, second) = tree_with_card();
        let next = move_property(&tree, "card", &second, 0);
        let ids: Vec<&str> = next
            .class("card")
            .unwrap()
            .properties
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(ids, vec![second.as_str(), first.as_str()]);

        let back = move_property(&next, "card", &second, 99);
        assert_eq!(back, tree);
    }

    #[test]
    fn test_property_patch_deserialization() {
        let patch: PropertyPatch =
            serde_json::from_str(r#"{ "type": "margin" }"#).unwrap();
        assert_eq!(patch, PropertyPatch::property_type("margin"));
    }
}

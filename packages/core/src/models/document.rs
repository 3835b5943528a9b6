//! Mix Document and Store Record
//!
//! A mix is one persisted editor document: the element tree plus its CSS
//! tree. The store keeps it as opaque JSON in `jsonContent`:
//!
//! ```json
//! {
//!   "id": 7,
//!   "jsonContent": {
//!     "treeData": { "id": "root", "tag": "div", "childrens": [] },
//!     "cssData": { "classes": {} }
//!   }
//! }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::css::CssTree;
use super::node::{NodeTree, ValidationError};

/// Tree + CSS document as edited and persisted
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MixDocument {
    pub tree_data: NodeTree,

    #[serde(default)]
    pub css_data: CssTree,
}

impl MixDocument {
    pub fn new(tree_data: NodeTree, css_data: CssTree) -> Self {
        Self {
            tree_data,
            css_data,
        }
    }

    /// Parse a document from the store's JSON content
    pub fn from_json(value: serde_json::Value) -> Result<Self, ValidationError> {
        serde_json::from_value(value).map_err(|e| ValidationError::InvalidDocument(e.to_string()))
    }

    /// JSON content for the store
    pub fn to_json(&self) -> Result<serde_json::Value, ValidationError> {
        serde_json::to_value(self).map_err(|e| ValidationError::InvalidDocument(e.to_string()))
    }
}

/// Record of the `mixes` store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mix {
    /// Store-assigned numeric id
    pub id: i64,

    pub json_content: serde_json::Value,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Mix {
    /// Decode the stored content as a document
    pub fn document(&self) -> Result<MixDocument, ValidationError> {
        MixDocument::from_json(self.json_content.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_document_wire_shape() {
        let document = MixDocument::default();
        let json = document.to_json().unwrap();

        assert_eq!(json["treeData"]["id"], "root");
        assert!(json["treeData"]["childrens"].as_array().unwrap().is_empty());
        assert!(json["cssData"]["classes"].as_object().unwrap().is_empty());
    }

    #[test]
    fn test_document_without_css_data() {
        let document = MixDocument::from_json(json!({
            "treeData": { "id": "root", "tag": "div", "title": "", "classes": [],
                          "style": [], "content": "", "childrens": [] }
        }))
        .unwrap();
        assert!(document.css_data.is_empty());
        assert_eq!(document.tree_data.node_count(), 1);
    }

    #[test]
    fn test_invalid_document_reported() {
        let err = MixDocument::from_json(json!({ "treeData": 5 })).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidDocument(_)));
    }

    #[test]
    fn test_mix_record_serialization() {
        let now = Utc::now();
        let mix = Mix {
            id: 3,
            json_content: MixDocument::default().to_json().unwrap(),
            created_at: now,
            updated_at: now,
        };
        let json = serde_json::to_value(&mix).unwrap();
        assert_eq!(json["id"], 3);
        assert!(json.get("jsonContent").is_some());
        assert_eq!(mix.document().unwrap(), MixDocument::default());
    }
}

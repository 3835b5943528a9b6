//! Document Events
//!
//! Events emitted by a [`DocumentContext`](crate::services::DocumentContext)
//! whenever its document changes. They are delivered over a tokio broadcast
//! channel so any number of subscribers (canvas, layer panel, cache
//! invalidation) can follow changes without coupling to the editor.

use serde::{Deserialize, Serialize};

use crate::operations::DropPosition;

/// Change notifications for one open document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum DocumentEvent {
    #[serde(rename_all = "camelCase")]
    NodeCreated { id: String, parent_id: String },

    /// `removed` counts the node and its descendants
    #[serde(rename_all = "camelCase")]
    NodeDeleted { id: String, removed: usize },

    NodeUpdated { id: String },

    #[serde(rename_all = "camelCase")]
    NodeMoved {
        id: String,
        target_id: String,
        position: DropPosition,
    },

    SelectionChanged { id: Option<String> },

    /// Any change to the CSS tree
    CssChanged,

    /// A document was loaded from the store
    #[serde(rename_all = "camelCase")]
    Loaded { mix_id: i64 },

    /// The document was written to the store
    #[serde(rename_all = "camelCase")]
    Saved { mix_id: i64 },
}

impl DocumentEvent {
    /// Get a string representation of the event type
    pub fn event_type(&self) -> &str {
        match self {
            DocumentEvent::NodeCreated { .. } => "node:created",
            DocumentEvent::NodeDeleted { .. } => "node:deleted",
            DocumentEvent::NodeUpdated { .. } => "node:updated",
            DocumentEvent::NodeMoved { .. } => "node:moved",
            DocumentEvent::SelectionChanged { .. } => "selection:changed",
            DocumentEvent::CssChanged => "css:changed",
            DocumentEvent::Loaded { .. } => "mix:loaded",
            DocumentEvent::Saved { .. } => "mix:saved",
        }
    }
}

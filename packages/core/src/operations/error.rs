//! Error types for tree operations
//!
//! This module defines the errors tree mutations report. Mutations never
//! modify their input tree, so every error leaves the caller's snapshot
//! exactly as it was.

use thiserror::Error;

use crate::models::ValidationError;

/// Errors that can occur during tree operations
///
/// Missing-target variants ([`NodeOperationError::is_missing_target`]) are
/// expected when UI edits race with deletions; the document context treats
/// them as silent no-ops.
///
/// # Examples
///
/// ```rust
/// use mixa_core::operations::NodeOperationError;
///
/// let err = NodeOperationError::node_not_found("node-123");
/// assert!(err.is_missing_target());
/// assert_eq!(err.to_string(), "Node 'node-123' does not exist");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NodeOperationError {
    /// Referenced node does not exist
    #[error("Node '{node_id}' does not exist")]
    NodeNotFound { node_id: String },

    /// Dragged node does not exist
    #[error("Source node '{node_id}' not found")]
    SourceNotFound { node_id: String },

    /// Drop target does not exist
    #[error("Target node '{node_id}' not found")]
    TargetNotFound { node_id: String },

    /// The root can't be deleted or moved
    #[error("Root node '{node_id}' cannot be {action}")]
    RootImmutable { node_id: String, action: String },

    /// Node would be moved into itself or its own subtree
    #[error("Circular move: node '{source_id}' cannot be moved into '{target_id}'")]
    CircularMove {
        source_id: String,
        target_id: String,
    },

    /// Void elements can't hold children
    #[error("Void element '{node_id}' with tag '{tag}' cannot contain children")]
    VoidElement { node_id: String, tag: String },

    /// Drop position has no valid placement
    #[error("Invalid drop: {reason}")]
    InvalidDrop { reason: String },

    /// Validation error from the model layer
    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationError),
}

impl NodeOperationError {
    pub fn node_not_found(node_id: impl Into<String>) -> Self {
        Self::NodeNotFound {
            node_id: node_id.into(),
        }
    }

    pub fn source_not_found(node_id: impl Into<String>) -> Self {
        Self::SourceNotFound {
            node_id: node_id.into(),
        }
    }

    pub fn target_not_found(node_id: impl Into<String>) -> Self {
        Self::TargetNotFound {
            node_id: node_id.into(),
        }
    }

    pub fn root_immutable(node_id: impl Into<String>, action: impl Into<String>) -> Self {
        Self::RootImmutable {
            node_id: node_id.into(),
            action: action.into(),
        }
    }

    pub fn circular_move(source_id: impl Into<String>, target_id: impl Into<String>) -> Self {
        Self::CircularMove {
            source_id: source_id.into(),
            target_id: target_id.into(),
        }
    }

    pub fn void_element(node_id: impl Into<String>, tag: impl Into<String>) -> Self {
        Self::VoidElement {
            node_id: node_id.into(),
            tag: tag.into(),
        }
    }

    pub fn invalid_drop(reason: impl Into<String>) -> Self {
        Self::InvalidDrop {
            reason: reason.into(),
        }
    }

    /// True for errors caused by an id that no longer exists
    pub fn is_missing_target(&self) -> bool {
        matches!(
            self,
            Self::NodeNotFound { .. } | Self::SourceNotFound { .. } | Self::TargetNotFound { .. }
        )
    }

    /// True for errors the editor treats as a no-op rather than a failure
    pub fn is_tolerated(&self) -> bool {
        self.is_missing_target() || matches!(self, Self::RootImmutable { .. })
    }
}

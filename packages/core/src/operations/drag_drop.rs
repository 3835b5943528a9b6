//! Drag-and-drop reparenting
//!
//! Moves a node to a new position relative to a drop target, and infers the
//! drop position from where the pointer sits over the target's bounds.

use serde::{Deserialize, Serialize};

use crate::models::NodeTree;
use crate::operations::NodeOperationError;

/// Default share of the target height that counts as a before/after edge
pub const DEFAULT_DROP_EDGE_RATIO: f64 = 0.25;

/// Where a dragged node lands relative to the drop target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DropPosition {
    Before,
    After,
    Inside,
}

/// Vertical bounds of the element under the pointer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DropBounds {
    pub top: f64,
    pub height: f64,
}

impl DropBounds {
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }
}

/// Infer the drop position using the default edge ratio
pub fn calculate_drop_position(bounds: DropBounds, pointer_y: f64) -> DropPosition {
    calculate_drop_position_with_ratio(bounds, pointer_y, DEFAULT_DROP_EDGE_RATIO)
}

/// Infer the drop position: top edge is `Before`, bottom edge is `After`,
/// everything between is `Inside`.
///
/// `edge_ratio` is clamped to `0.0..=0.5`. Degenerate bounds resolve to
/// `Inside`.
pub fn calculate_drop_position_with_ratio(
    bounds: DropBounds,
    pointer_y: f64,
    edge_ratio: f64,
) -> DropPosition {
    if bounds.height.is_nan() || bounds.height <= 0.0 || !pointer_y.is_finite() {
        return DropPosition::Inside;
    }

    let ratio = if edge_ratio.is_nan() {
        DEFAULT_DROP_EDGE_RATIO
    } else {
        edge_ratio.clamp(0.0, 0.5)
    };
    let offset = (pointer_y - bounds.top) / bounds.height;

    if offset < ratio {
        DropPosition::Before
    } else if offset > 1.0 - ratio {
        DropPosition::After
    } else {
        DropPosition::Inside
    }
}

impl NodeTree {
    /// Move `source_id` (with its subtree) relative to `target_id`.
    ///
    /// Dropping inside a void element places the source right after it.
    /// On error the caller's tree is unchanged, so a failed move is atomic.
    ///
    /// # Example
    ///
    /// ```rust
    /// use mixa_core::models::NodeTree;
    /// use mixa_core::operations::DropPosition;
    ///
    /// let tree = NodeTree::new();
    /// let (tree, a) = tree.create_element("root").unwrap();
    /// let (tree, b) = tree.create_element("root").unwrap();
    ///
    /// let tree = tree.move_element(&b, &a, DropPosition::Inside).unwrap();
    /// assert_eq!(tree.parent_of(&b).unwrap().id, a);
    /// ```
    pub fn move_element(
        &self,
        source_id: &str,
        target_id: &str,
        position: DropPosition,
    ) -> Result<NodeTree, NodeOperationError> {
        let source = self
            .node(source_id)
            .ok_or_else(|| NodeOperationError::source_not_found(source_id))?;
        if source.is_root() {
            return Err(NodeOperationError::root_immutable(source_id, "moved"));
        }

        let target = self
            .node(target_id)
            .ok_or_else(|| NodeOperationError::target_not_found(target_id))?;
        if source_id == target_id || self.is_ancestor(source_id, target_id) {
            return Err(NodeOperationError::circular_move(source_id, target_id));
        }

        // (new parent, sibling to insert after/before, offset)
        let (parent_id, anchor) = match position {
            DropPosition::Inside if target.is_void() => match target.parent_id() {
                Some(parent) => (parent.to_string(), Some((target_id, 1))),
                None => {
                    tracing::warn!(
                        "Void drop target {} has no parent, leaving {} in place",
                        target_id,
                        source_id
                    );
                    return Ok(self.clone());
                }
            },
            DropPosition::Inside => (target_id.to_string(), None),
            DropPosition::Before | DropPosition::After => {
                let parent = target.parent_id().ok_or_else(|| {
                    NodeOperationError::invalid_drop(format!(
                        "cannot drop {:?} the root node '{}'",
                        position, target_id
                    ))
                })?;
                let offset = if position == DropPosition::After { 1 } else { 0 };
                (parent.to_string(), Some((target_id, offset)))
            }
        };

        let mut next = self.clone();
        next.detach(source_id)
            .ok_or_else(|| NodeOperationError::source_not_found(source_id))?;

        // Target index is read after the detach so same-parent moves land correctly
        let index = match anchor {
            Some((anchor_id, offset)) => {
                let index = next
                    .index_in_parent(anchor_id)
                    .ok_or_else(|| NodeOperationError::target_not_found(anchor_id))?;
                Some(index + offset)
            }
            None => None,
        };
        next.link(source_id, &parent_id, index);

        tracing::debug!(
            "Moved {} {:?} {} (parent {})",
            source_id,
            position,
            target_id,
            parent_id
        );
        Ok(next)
    }
}

/// Ephemeral drag interaction state: the id being dragged between
/// drag-start and drop.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DragState {
    dragged: Option<String>,
}

impl DragState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin dragging `id`, replacing any drag in progress
    pub fn start(&mut self, id: impl Into<String>) {
        self.dragged = Some(id.into());
    }

    pub fn dragged(&self) -> Option<&str> {
        self.dragged.as_deref()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragged.is_some()
    }

    pub fn cancel(&mut self) {
        self.dragged = None;
    }

    /// End the drag, returning the dragged id
    pub fn take(&mut self) -> Option<String> {
        self.dragged.take()
    }
}

#[cfg(test)]
#[path = "drag_drop_test.rs"]
mod drag_drop_test;

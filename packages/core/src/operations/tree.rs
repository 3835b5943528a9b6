//! Node tree store operations
//!
//! Create, delete and field-level update of elements, addressed by id.
//! Each operation borrows the current tree and returns a new one; on error the
//! caller's tree is untouched.
//!
//! # Example
//!
//! ```rust
//! use mixa_core::models::NodeTree;
//! use mixa_core::operations::NodeEdit;
//!
//! let tree = NodeTree::new();
//! let (tree, id) = tree.create_element("root").unwrap();
//! let tree = tree
//!     .update_node(&id, NodeEdit::AppendClass("card".to_string()))
//!     .unwrap();
//! assert_eq!(tree.node(&id).unwrap().classes, vec!["card"]);
//!
//! let tree = tree.delete_element(&id).unwrap();
//! assert_eq!(tree.node_count(), 1);
//! ```

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{is_void_tag, ElementNode, NodeTree, DEFAULT_TAG};
use crate::operations::NodeOperationError;

/// Field-level edit applied by [`NodeTree::update_node`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum NodeEdit {
    /// Replace the class at `index` (ignored when out of range)
    RenameClass { index: usize, name: String },
    AppendClass(String),
    /// Remove the class at `index` (ignored when out of range)
    RemoveClass(usize),
    SetCss(String),
    SetContent(String),
    SetTag(String),
    SetTitle(String),
}

impl NodeEdit {
    fn apply(self, node: &mut ElementNode) {
        match self {
            NodeEdit::RenameClass { index, name } => {
                if let Some(class) = node.classes.get_mut(index) {
                    *class = name;
                }
            }
            NodeEdit::AppendClass(name) => node.classes.push(name),
            NodeEdit::RemoveClass(index) => {
                if index < node.classes.len() {
                    node.classes.remove(index);
                }
            }
            NodeEdit::SetCss(css) => node.css = css,
            NodeEdit::SetContent(content) => node.content = content,
            NodeEdit::SetTag(tag) => node.tag = tag,
            NodeEdit::SetTitle(title) => node.title = title,
        }
    }
}

impl NodeTree {
    /// Append a new `div` as the last child of `parent_id`.
    ///
    /// Returns the new tree and the generated id.
    pub fn create_element(
        &self,
        parent_id: &str,
    ) -> Result<(NodeTree, String), NodeOperationError> {
        self.create_element_with_tag(parent_id, DEFAULT_TAG)
    }

    /// Append a new element with `tag` as the last child of `parent_id`
    pub fn create_element_with_tag(
        &self,
        parent_id: &str,
        tag: &str,
    ) -> Result<(NodeTree, String), NodeOperationError> {
        let parent = self
            .node(parent_id)
            .ok_or_else(|| NodeOperationError::node_not_found(parent_id))?;

        if parent.is_void() {
            return Err(NodeOperationError::void_element(
                parent_id,
                parent.tag.clone(),
            ));
        }

        let mut child = ElementNode::new(tag);
        while self.contains(&child.id) {
            child.id = Uuid::new_v4().to_string();
        }
        let child_id = child.id.clone();

        let mut next = self.clone();
        next.insert_child(parent_id, child, None);

        tracing::debug!("Created element {} under {}", child_id, parent_id);
        Ok((next, child_id))
    }

    /// Remove `id` and its entire subtree
    pub fn delete_element(&self, id: &str) -> Result<NodeTree, NodeOperationError> {
        let node = self
            .node(id)
            .ok_or_else(|| NodeOperationError::node_not_found(id))?;

        if node.is_root() {
            return Err(NodeOperationError::root_immutable(id, "deleted"));
        }

        let removed = self.subtree_ids(id);
        let mut next = self.clone();
        next.detach(id);
        next.remove_records(&removed);

        tracing::debug!("Deleted element {} ({} nodes)", id, removed.len());
        Ok(next)
    }

    /// Apply a field edit to the element `id`
    pub fn update_node(&self, id: &str, edit: NodeEdit) -> Result<NodeTree, NodeOperationError> {
        let node = self
            .node(id)
            .ok_or_else(|| NodeOperationError::node_not_found(id))?;

        if let NodeEdit::SetTag(tag) = &edit {
            if is_void_tag(tag) && !node.child_ids().is_empty() {
                return Err(NodeOperationError::void_element(id, tag.clone()));
            }
        }

        let mut next = self.clone();
        if let Some(node) = next.node_mut(id) {
            edit.apply(node);
        }
        Ok(next)
    }
}

#[cfg(test)]
#[path = "tree_test.rs"]
mod tree_test;

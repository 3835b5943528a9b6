//! Node Data Structures
//!
//! This module defines the element tree behind the visual editor.
//!
//! # Architecture
//!
//! - **Arena storage**: every element lives in an id-indexed map; parent and
//!   child links are stored as ids, so lookups by id and parent lookups are O(1)
//! - **Snapshots**: records are shared through `Arc` and cloned on write, so a
//!   mutation produces a new `NodeTree` without touching earlier snapshots
//! - **Wire shape**: the persisted form is the nested [`TreeNode`] document
//!   (`childrens` included), converted on (de)serialization
//!
//! # Examples
//!
//! ```rust
//! use mixa_core::models::NodeTree;
//!
//! let tree = NodeTree::new();
//! let (tree, child_id) = tree.create_element(tree.root_id()).unwrap();
//!
//! assert_eq!(tree.node_count(), 2);
//! assert_eq!(tree.parent_of(&child_id).unwrap().id, "root");
//! ```

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

/// Tag given to elements created without an explicit tag
pub const DEFAULT_TAG: &str = "div";

/// Id of the root element of a freshly initialized document
pub const ROOT_ID: &str = "root";

/// HTML void elements; these can never contain children
pub const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Whether `tag` names a void element (case-insensitive)
pub fn is_void_tag(tag: &str) -> bool {
    VOID_TAGS.iter().any(|void| void.eq_ignore_ascii_case(tag.trim()))
}

fn default_tag() -> String {
    DEFAULT_TAG.to_string()
}

/// Validation errors for documents that break the tree invariants
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Duplicate node ID: {0}")]
    DuplicateId(String),

    #[error("Void element '{node_id}' with tag '{tag}' cannot contain children")]
    VoidWithChildren { node_id: String, tag: String },

    #[error("Invalid document: {0}")]
    InvalidDocument(String),
}

/// One element of the visual document tree.
///
/// `parent_id` and `children` are maintained by [`NodeTree`]; everything else
/// is plain editable data.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementNode {
    /// Unique identifier, stable for the element's lifetime
    pub id: String,

    /// Tag name (e.g. "div", "img")
    pub tag: String,

    /// Display label shown in the layer panel
    pub title: String,

    /// Ordered class names (may contain empty placeholder entries)
    pub classes: Vec<String>,

    /// Opaque style entries carried verbatim from the wire document
    pub style: Vec<serde_json::Value>,

    /// Inline style override
    pub css: String,

    /// Literal text content
    pub content: String,

    parent_id: Option<String>,
    children: Vec<String>,
}

impl ElementNode {
    /// Create a detached element with a generated UUID
    pub fn new(tag: impl Into<String>) -> Self {
        Self::new_with_id(Uuid::new_v4().to_string(), tag)
    }

    /// Create a detached element with an explicit id
    pub fn new_with_id(id: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            tag: tag.into(),
            title: String::new(),
            classes: Vec::new(),
            style: Vec::new(),
            css: String::new(),
            content: String::new(),
            parent_id: None,
            children: Vec::new(),
        }
    }

    pub fn parent_id(&self) -> Option<&str> {
        self.parent_id.as_deref()
    }

    /// Ordered ids of the direct children
    pub fn child_ids(&self) -> &[String] {
        &self.children
    }

    pub fn is_void(&self) -> bool {
        is_void_tag(&self.tag)
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// Wire representation of a node, nested the way the store persists it.
///
/// The plural `childrens` is part of the stored format and must not change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeNode {
    pub id: String,

    #[serde(default = "default_tag")]
    pub tag: String,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub classes: Vec<String>,

    #[serde(default)]
    pub style: Vec<serde_json::Value>,

    /// Only emitted when set, so stock documents keep the exact stored shape
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub css: String,

    #[serde(default)]
    pub content: String,

    #[serde(default)]
    pub childrens: Vec<TreeNode>,
}

/// Arena-backed element tree with exactly one root.
///
/// Every public mutation (see `operations::tree` and `operations::drag_drop`)
/// borrows `self` and returns a new tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TreeNode", into = "TreeNode")]
pub struct NodeTree {
    root_id: String,
    nodes: HashMap<String, Arc<ElementNode>>,
}

impl Default for NodeTree {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeTree {
    /// Create a tree holding a single `div` root with id `"root"`
    pub fn new() -> Self {
        let mut root = ElementNode::new_with_id(ROOT_ID, DEFAULT_TAG);
        root.title = "Root".to_string();
        Self::with_root(root)
    }

    /// Create a tree from a detached root element.
    ///
    /// Any links the element carries are discarded.
    pub fn with_root(mut root: ElementNode) -> Self {
        root.parent_id = None;
        root.children.clear();
        let root_id = root.id.clone();
        let mut nodes = HashMap::new();
        nodes.insert(root_id.clone(), Arc::new(root));
        Self { root_id, nodes }
    }

    pub fn root_id(&self) -> &str {
        &self.root_id
    }

    pub fn root(&self) -> &ElementNode {
        // The root entry is inserted on construction and never removed
        &self.nodes[&self.root_id]
    }

    pub fn node(&self, id: &str) -> Option<&ElementNode> {
        self.nodes.get(id).map(Arc::as_ref)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Total number of elements, root included
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Parent element of `id` (None for the root or unknown ids)
    pub fn parent_of(&self, id: &str) -> Option<&ElementNode> {
        self.node(id)?.parent_id().and_then(|parent| self.node(parent))
    }

    /// Direct children of `id`, in order
    pub fn children(&self, id: &str) -> impl Iterator<Item = &ElementNode> + '_ {
        self.node(id)
            .map(|node| node.children.as_slice())
            .unwrap_or_default()
            .iter()
            .filter_map(|child| self.node(child))
    }

    /// Position of `id` within its parent's children
    pub fn index_in_parent(&self, id: &str) -> Option<usize> {
        let parent = self.parent_of(id)?;
        parent.children.iter().position(|child| child == id)
    }

    /// Whether `ancestor` is a strict ancestor of `id`
    pub fn is_ancestor(&self, ancestor: &str, id: &str) -> bool {
        let mut current = self.node(id).and_then(ElementNode::parent_id);
        while let Some(parent) = current {
            if parent == ancestor {
                return true;
            }
            current = self.node(parent).and_then(ElementNode::parent_id);
        }
        false
    }

    /// Ids of `id` and all its descendants in depth-first order
    pub fn subtree_ids(&self, id: &str) -> Vec<String> {
        self.iter_subtree(id).map(|node| node.id.clone()).collect()
    }

    /// Number of elements in the subtree rooted at `id` (0 if unknown)
    pub fn subtree_size(&self, id: &str) -> usize {
        self.iter_subtree(id).count()
    }

    /// Iterate over all elements in depth-first pre-order
    pub fn iter_dfs(&self) -> DfsIter<'_> {
        self.iter_subtree(&self.root_id)
    }

    /// Iterate over the subtree rooted at `id` in depth-first pre-order
    pub fn iter_subtree(&self, id: &str) -> DfsIter<'_> {
        let stack = if self.contains(id) {
            vec![id.to_string()]
        } else {
            Vec::new()
        };
        DfsIter { tree: self, stack }
    }

    /// Convert to the nested wire shape
    pub fn to_tree_node(&self) -> TreeNode {
        self.build_tree_node(self.root())
    }

    fn build_tree_node(&self, node: &ElementNode) -> TreeNode {
        TreeNode {
            id: node.id.clone(),
            tag: node.tag.clone(),
            title: node.title.clone(),
            classes: node.classes.clone(),
            style: node.style.clone(),
            css: node.css.clone(),
            content: node.content.clone(),
            childrens: self
                .children(&node.id)
                .map(|child| self.build_tree_node(child))
                .collect(),
        }
    }

    // ------------------------------------------------------------------
    // Crate-internal link maintenance. Callers work on a cloned snapshot.
    // ------------------------------------------------------------------

    /// Copy-on-write access to one record
    pub(crate) fn node_mut(&mut self, id: &str) -> Option<&mut ElementNode> {
        self.nodes.get_mut(id).map(Arc::make_mut)
    }

    /// Insert a detached element under `parent_id` at `index` (end when None)
    pub(crate) fn insert_child(
        &mut self,
        parent_id: &str,
        mut child: ElementNode,
        index: Option<usize>,
    ) {
        child.parent_id = Some(parent_id.to_string());
        child.children.clear();
        let child_id = child.id.clone();
        self.nodes.insert(child_id.clone(), Arc::new(child));
        self.link(&child_id, parent_id, index);
    }

    /// Unlink `id` from its parent, keeping its subtree in the arena.
    ///
    /// Returns the former parent id and index.
    pub(crate) fn detach(&mut self, id: &str) -> Option<(String, usize)> {
        let parent_id = self.node(id)?.parent_id.clone()?;
        let parent = self.node_mut(&parent_id)?;
        let index = parent.children.iter().position(|child| child == id)?;
        parent.children.remove(index);
        if let Some(node) = self.node_mut(id) {
            node.parent_id = None;
        }
        Some((parent_id, index))
    }

    /// Link an already-present, detached `id` under `parent_id`
    pub(crate) fn link(&mut self, id: &str, parent_id: &str, index: Option<usize>) {
        if let Some(parent) = self.node_mut(parent_id) {
            let index = index
                .unwrap_or(parent.children.len())
                .min(parent.children.len());
            parent.children.insert(index, id.to_string());
        }
        if let Some(node) = self.node_mut(id) {
            node.parent_id = Some(parent_id.to_string());
        }
    }

    /// Drop the records of `ids` from the arena (links are not touched)
    pub(crate) fn remove_records(&mut self, ids: &[String]) {
        for id in ids {
            self.nodes.remove(id);
        }
    }
}

/// Depth-first iterator over tree elements
pub struct DfsIter<'a> {
    tree: &'a NodeTree,
    stack: Vec<String>,
}

impl<'a> Iterator for DfsIter<'a> {
    type Item = &'a ElementNode;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.stack.pop()?;
        let node = self.tree.node(&current)?;

        // Push children in reverse order so they're visited left-to-right
        self.stack.extend(node.children.iter().rev().cloned());

        Some(node)
    }
}

impl TryFrom<TreeNode> for NodeTree {
    type Error = ValidationError;

    fn try_from(root: TreeNode) -> Result<Self, Self::Error> {
        if root.id.is_empty() {
            return Err(ValidationError::MissingField("id".to_string()));
        }

        let mut nodes: HashMap<String, Arc<ElementNode>> = HashMap::new();
        let mut seen = HashSet::new();
        let root_id = root.id.clone();
        let mut stack: Vec<(TreeNode, Option<String>)> = vec![(root, None)];

        while let Some((wire, parent_id)) = stack.pop() {
            if wire.id.is_empty() {
                return Err(ValidationError::MissingField("id".to_string()));
            }
            if !seen.insert(wire.id.clone()) {
                return Err(ValidationError::DuplicateId(wire.id));
            }
            if is_void_tag(&wire.tag) && !wire.childrens.is_empty() {
                return Err(ValidationError::VoidWithChildren {
                    node_id: wire.id,
                    tag: wire.tag,
                });
            }

            let children: Vec<String> = wire.childrens.iter().map(|c| c.id.clone()).collect();
            let node = ElementNode {
                id: wire.id.clone(),
                tag: wire.tag,
                title: wire.title,
                classes: wire.classes,
                style: wire.style,
                css: wire.css,
                content: wire.content,
                parent_id,
                children,
            };

            for child in wire.childrens.into_iter().rev() {
                stack.push((child, Some(wire.id.clone())));
            }
            nodes.insert(wire.id, Arc::new(node));
        }

        Ok(Self { root_id, nodes })
    }
}

impl From<NodeTree> for TreeNode {
    fn from(tree: NodeTree) -> Self {
        tree.to_tree_node()
    }
}

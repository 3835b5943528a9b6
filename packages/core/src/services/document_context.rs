//! Document Context
//!
//! An explicitly passed handle for one open document. It owns the current
//! [`MixDocument`] snapshot and the editor state around it (selection, drag,
//! schema tables, config), applies operations by building a new snapshot and
//! swapping it in, and broadcasts a [`DocumentEvent`] per change.
//!
//! # Error policy
//!
//! Operations that target an id which no longer exists (a UI edit racing a
//! delete), or that try to delete/move the root, are silent no-ops: they
//! return `Ok(false)` and are logged at `debug`. Structural violations
//! (circular moves, void parents) and persistence failures are returned as
//! [`DocumentError`].
//!
//! # Examples
//!
//! ```rust
//! use mixa_core::config::EditorConfig;
//! use mixa_core::operations::{DropPosition, NodeEdit};
//! use mixa_core::services::DocumentContext;
//!
//! let mut ctx = DocumentContext::new(EditorConfig::default());
//! let card = ctx.create_element("root").unwrap().unwrap();
//! let title = ctx.create_element("root").unwrap().unwrap();
//!
//! ctx.move_element(&title, &card, DropPosition::Inside).unwrap();
//! ctx.update_node(&title, NodeEdit::SetContent("Hello".to_string())).unwrap();
//!
//! assert_eq!(ctx.tree().parent_of(&title).unwrap().id, card);
//! ```

use std::sync::Arc;
use tokio::sync::broadcast;

use crate::config::EditorConfig;
use crate::css::{generate_class_css, generate_css_from_tree, render_stylesheet, ClassCss};
use crate::db::{DocumentEvent, MixStore};
use crate::models::{CssTree, ElementNode, MixDocument, NodeTree, SchemaRegistry};
use crate::operations::{
    self, calculate_drop_position_with_ratio, DragState, DropBounds, DropPosition, NodeEdit,
    NodeOperationError, PropertyPatch,
};
use crate::services::DocumentError;

/// Handle for one open document
pub struct DocumentContext {
    document: MixDocument,

    /// At most one selected node; never persisted
    selected: Option<String>,

    drag: DragState,

    schemas: Arc<SchemaRegistry>,

    config: EditorConfig,

    store: Option<Arc<dyn MixStore>>,

    /// Store id of the document, once created or loaded
    mix_id: Option<i64>,

    event_tx: broadcast::Sender<DocumentEvent>,
}

impl std::fmt::Debug for DocumentContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentContext")
            .field("nodes", &self.document.tree_data.node_count())
            .field("classes", &self.document.css_data.len())
            .field("selected", &self.selected)
            .field("mix_id", &self.mix_id)
            .field("attached", &self.store.is_some())
            .finish()
    }
}

impl DocumentContext {
    /// Create a context holding an empty document (a single root)
    pub fn new(config: EditorConfig) -> Self {
        Self::with_document(MixDocument::default(), config)
    }

    /// Create a context around an existing document
    pub fn with_document(document: MixDocument, config: EditorConfig) -> Self {
        let (event_tx, _) = broadcast::channel(config.event_capacity.max(1));
        Self {
            document,
            selected: None,
            drag: DragState::new(),
            schemas: Arc::new(SchemaRegistry::core()),
            config,
            store: None,
            mix_id: None,
            event_tx,
        }
    }

    /// Replace the schema tables used for formatting and placeholders
    pub fn with_schemas(mut self, schemas: Arc<SchemaRegistry>) -> Self {
        self.schemas = schemas;
        self
    }

    /// Attach a store; the next `save` creates a new mix in it
    pub fn attach(&mut self, store: Arc<dyn MixStore>) {
        self.store = Some(store);
        self.mix_id = None;
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Current document snapshot
    pub fn snapshot(&self) -> &MixDocument {
        &self.document
    }

    pub fn tree(&self) -> &NodeTree {
        &self.document.tree_data
    }

    pub fn css_tree(&self) -> &CssTree {
        &self.document.css_data
    }

    pub fn schemas(&self) -> &SchemaRegistry {
        &self.schemas
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn mix_id(&self) -> Option<i64> {
        self.mix_id
    }

    /// Subscribe to document events
    pub fn subscribe(&self) -> broadcast::Receiver<DocumentEvent> {
        self.event_tx.subscribe()
    }

    /// Ignores send errors: having no subscribers is normal
    fn emit_event(&self, event: DocumentEvent) {
        let _ = self.event_tx.send(event);
    }

    /// Swap in a successful tree result.
    ///
    /// Tolerated misses and unchanged trees become `Ok(false)`.
    fn commit_tree(
        &mut self,
        result: Result<NodeTree, NodeOperationError>,
        action: &str,
    ) -> Result<bool, DocumentError> {
        match result {
            Ok(tree) if tree == self.document.tree_data => {
                tracing::debug!("{} left the tree unchanged", action);
                Ok(false)
            }
            Ok(tree) => {
                self.document.tree_data = tree;
                Ok(true)
            }
            Err(err) if err.is_tolerated() => {
                tracing::debug!("Ignoring {}: {}", action, err);
                Ok(false)
            }
            Err(err) => Err(err.into()),
        }
    }

    fn commit_css(&mut self, css: CssTree) -> bool {
        if css == self.document.css_data {
            return false;
        }
        self.document.css_data = css;
        self.emit_event(DocumentEvent::CssChanged);
        true
    }

    // ------------------------------------------------------------------
    // Node tree
    // ------------------------------------------------------------------

    /// Append a new element (configured default tag) under `parent_id`.
    ///
    /// Returns the new id, or `None` when the parent no longer exists.
    pub fn create_element(&mut self, parent_id: &str) -> Result<Option<String>, DocumentError> {
        let result = self
            .document
            .tree_data
            .create_element_with_tag(parent_id, &self.config.default_tag);

        let (tree, id) = match result {
            Ok(created) => created,
            Err(err) if err.is_tolerated() => {
                tracing::debug!("Ignoring create under {}: {}", parent_id, err);
                return Ok(None);
            }
            Err(err) => return Err(err.into()),
        };

        self.document.tree_data = tree;
        self.emit_event(DocumentEvent::NodeCreated {
            id: id.clone(),
            parent_id: parent_id.to_string(),
        });
        Ok(Some(id))
    }

    /// Delete `id` and its subtree, clearing the selection if it was inside
    pub fn delete_element(&mut self, id: &str) -> Result<bool, DocumentError> {
        let removed = self.document.tree_data.subtree_size(id);
        let result = self.document.tree_data.delete_element(id);
        if !self.commit_tree(result, "delete")? {
            return Ok(false);
        }

        self.emit_event(DocumentEvent::NodeDeleted {
            id: id.to_string(),
            removed,
        });

        let selection_removed = self
            .selected
            .as_deref()
            .is_some_and(|selected| !self.document.tree_data.contains(selected));
        if selection_removed {
            self.selected = None;
            self.emit_event(DocumentEvent::SelectionChanged { id: None });
        }

        let drag_removed = self
            .drag
            .dragged()
            .is_some_and(|dragged| !self.document.tree_data.contains(dragged));
        if drag_removed {
            self.drag.cancel();
        }
        Ok(true)
    }

    pub fn update_node(&mut self, id: &str, edit: NodeEdit) -> Result<bool, DocumentError> {
        let result = self.document.tree_data.update_node(id, edit);
        let changed = self.commit_tree(result, "update")?;
        if changed {
            self.emit_event(DocumentEvent::NodeUpdated { id: id.to_string() });
        }
        Ok(changed)
    }

    pub fn move_element(
        &mut self,
        source_id: &str,
        target_id: &str,
        position: DropPosition,
    ) -> Result<bool, DocumentError> {
        let result = self
            .document
            .tree_data
            .move_element(source_id, target_id, position);
        let changed = self.commit_tree(result, "move")?;
        if changed {
            self.emit_event(DocumentEvent::NodeMoved {
                id: source_id.to_string(),
                target_id: target_id.to_string(),
                position,
            });
        }
        Ok(changed)
    }

    // ------------------------------------------------------------------
    // Drag and drop
    // ------------------------------------------------------------------

    /// Begin dragging `id`; unknown ids are ignored
    pub fn start_drag(&mut self, id: &str) -> bool {
        if !self.document.tree_data.contains(id) {
            tracing::debug!("Ignoring drag start on unknown node {}", id);
            return false;
        }
        self.drag.start(id);
        true
    }

    pub fn dragged(&self) -> Option<&str> {
        self.drag.dragged()
    }

    pub fn cancel_drag(&mut self) {
        self.drag.cancel();
    }

    /// Drop the dragged node relative to `target_id`, ending the drag
    pub fn drop_dragged(
        &mut self,
        target_id: &str,
        position: DropPosition,
    ) -> Result<bool, DocumentError> {
        match self.drag.take() {
            Some(source_id) => self.move_element(&source_id, target_id, position),
            None => Ok(false),
        }
    }

    /// Drop at a pointer position over the target's bounds
    pub fn drop_dragged_at(
        &mut self,
        target_id: &str,
        bounds: DropBounds,
        pointer_y: f64,
    ) -> Result<bool, DocumentError> {
        let position =
            calculate_drop_position_with_ratio(bounds, pointer_y, self.config.drop_edge_ratio);
        self.drop_dragged(target_id, position)
    }

    // ------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------

    /// Select `id`, or clear the selection with `None`.
    ///
    /// Selecting an unknown id is a no-op and returns false.
    pub fn select(&mut self, id: Option<&str>) -> bool {
        if let Some(id) = id {
            if !self.document.tree_data.contains(id) {
                tracing::debug!("Ignoring selection of unknown node {}", id);
                return false;
            }
        }

        let next = id.map(str::to_string);
        if next != self.selected {
            self.selected = next.clone();
            self.emit_event(DocumentEvent::SelectionChanged { id: next });
        }
        true
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn selected_node(&self) -> Option<&ElementNode> {
        self.selected
            .as_deref()
            .and_then(|id| self.document.tree_data.node(id))
    }

    // ------------------------------------------------------------------
    // CSS tree
    // ------------------------------------------------------------------

    /// Add a class (generated name when `None`) and return its name
    pub fn add_class(&mut self, name: Option<&str>) -> String {
        let (css, name) = operations::add_class_with_prefix(
            &self.document.css_data,
            name,
            &self.config.class_prefix,
            self.config.class_id_length,
        );
        self.commit_css(css);
        name
    }

    pub fn remove_class(&mut self, name: &str) -> bool {
        let css = operations::remove_class(&self.document.css_data, name);
        self.commit_css(css)
    }

    pub fn rename_class(&mut self, old: &str, new: &str) -> bool {
        let css = operations::update_class(&self.document.css_data, old, new);
        self.commit_css(css)
    }

    /// Append a property with the schema default as placeholder
    pub fn add_property(&mut self, class_name: &str, property_type: &str) -> Option<String> {
        let (css, id) = operations::add_property_with(
            &self.document.css_data,
            class_name,
            property_type,
            Some(self.schemas.as_ref()),
        );
        self.commit_css(css);
        id
    }

    pub fn update_property(
        &mut self,
        class_name: &str,
        property_id: &str,
        patch: PropertyPatch,
    ) -> bool {
        let css =
            operations::update_property(&self.document.css_data, class_name, property_id, patch);
        self.commit_css(css)
    }

    pub fn delete_property(&mut self, class_name: &str, property_id: &str) -> bool {
        let css = operations::delete_property(&self.document.css_data, class_name, property_id);
        self.commit_css(css)
    }

    pub fn move_property(&mut self, class_name: &str, property_id: &str, to_index: usize) -> bool {
        let css = operations::move_property(
            &self.document.css_data,
            class_name,
            property_id,
            to_index,
        );
        self.commit_css(css)
    }

    /// Rule body of one class
    pub fn class_css(&self, class_name: &str) -> Option<String> {
        self.document
            .css_data
            .class(class_name)
            .map(|class| generate_class_css(class, &self.schemas))
    }

    pub fn css_for_tree(&self) -> Vec<ClassCss> {
        generate_css_from_tree(&self.document.css_data, &self.schemas)
    }

    pub fn stylesheet(&self) -> String {
        render_stylesheet(&self.document.css_data, &self.schemas)
    }

    // ------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------

    /// Replace the document with mix `id` from `store` and attach to it.
    ///
    /// On failure the current document stays as it was.
    pub async fn load(&mut self, store: Arc<dyn MixStore>, id: i64) -> Result<(), DocumentError> {
        let mix = store.get_mix(id).await?;
        let document = mix.document()?;

        self.document = document;
        self.selected = None;
        self.drag.cancel();
        self.store = Some(store);
        self.mix_id = Some(mix.id);

        tracing::info!(
            "Loaded mix {} ({} nodes, {} classes)",
            mix.id,
            self.document.tree_data.node_count(),
            self.document.css_data.len()
        );
        self.emit_event(DocumentEvent::Loaded { mix_id: mix.id });
        Ok(())
    }

    /// Write the current snapshot to the attached store.
    ///
    /// Creates the mix on first save, replaces it afterwards. Failures are
    /// returned to the caller and not retried.
    pub async fn save(&mut self) -> Result<i64, DocumentError> {
        let store = self.store.clone().ok_or(DocumentError::NotAttached)?;
        let content = self.document.to_json()?;

        let result = match self.mix_id {
            Some(id) => store.replace_mix(id, content).await,
            None => store.create_mix(content).await,
        };

        let mix = match result {
            Ok(mix) => mix,
            Err(err) => {
                tracing::warn!("Failed to save mix {:?}: {}", self.mix_id, err);
                return Err(err.into());
            }
        };

        self.mix_id = Some(mix.id);
        tracing::info!("Saved mix {}", mix.id);
        self.emit_event(DocumentEvent::Saved { mix_id: mix.id });
        Ok(mix.id)
    }
}

#[cfg(test)]
#[path = "document_context_test.rs"]
mod document_context_test;

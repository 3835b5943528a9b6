//! Document Operations
//!
//! Pure snapshot operations over the document:
//!
//! - [`tree`] - create, delete and update elements (`impl NodeTree`)
//! - [`drag_drop`] - reparenting moves and drop position inference
//! - [`css_tree`] - class and property editing on a `CssTree`
//!
//! Nothing here mutates its input. Callers swap in the returned snapshot,
//! which is what [`crate::services::DocumentContext`] does.

pub mod css_tree;
pub mod drag_drop;
pub mod error;
pub mod tree;

pub use css_tree::{
    add_class, add_class_with_prefix, add_property, add_property_with, delete_property,
    generate_class_name, move_property, remove_class, update_class, update_property,
    PropertyPatch, DEFAULT_CLASS_ID_LENGTH, DEFAULT_CLASS_PREFIX,
};
pub use drag_drop::{
    calculate_drop_position, calculate_drop_position_with_ratio, DragState, DropBounds,
    DropPosition, DEFAULT_DROP_EDGE_RATIO,
};
pub use error::NodeOperationError;
pub use tree::NodeEdit;

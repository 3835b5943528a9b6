//! Data Models
//!
//! This module contains the core data structures used throughout Mixa:
//!
//! - `NodeTree` / `ElementNode` - arena-backed element tree and its wire shape
//! - `CssTree` - class name → ordered property records
//! - `SchemaRegistry` - static CSS property and input type tables
//! - `MixDocument` / `Mix` - the persisted document and its store record

pub mod core_schemas;
mod css;
mod document;
mod node;
mod schema;

pub use css::{primitive_to_string, CssClass, CssProperty, CssTree, PropertyValue, TypedValue};
pub use document::{Mix, MixDocument};
pub use node::{
    is_void_tag, DfsIter, ElementNode, NodeTree, TreeNode, ValidationError, DEFAULT_TAG, ROOT_ID,
    VOID_TAGS,
};
pub use schema::{
    fill_template, InputKind, InputTypeSchema, PropertyGroup, PropertySchema, SchemaRegistry,
    VALUE_PLACEHOLDER,
};

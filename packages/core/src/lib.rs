//! Mixa Core Document Engine
//!
//! This crate provides the document model and mutation engine behind the Mixa
//! visual UI/CSS builder: an element tree edited by id, drag-and-drop
//! reparenting, per-class CSS editing and a schema-driven CSS formatter.
//!
//! # Architecture
//!
//! - **Immutable snapshots**: every tree and CSS operation returns a new
//!   snapshot; unchanged element records are shared
//! - **Arena tree**: elements are indexed by id with parent links, so lookups
//!   and moves never search the tree
//! - **Schema tables**: CSS properties and value grammars are static data,
//!   formatting never fails on unknown input
//! - **Store seam**: persistence goes through the async `MixStore` trait
//!
//! # Modules
//!
//! - [`models`] - Element tree, CSS tree, schema tables, document records
//! - [`operations`] - Tree mutation, drag-and-drop, CSS tree store
//! - [`css`] - Formatting engine and stylesheet generation
//! - [`services`] - `DocumentContext`, the per-document handle
//! - [`db`] - `MixStore` trait, in-memory store, document events
//! - [`config`] - Editor configuration

pub mod config;
pub mod css;
pub mod db;
pub mod models;
pub mod operations;
pub mod services;

// Re-export commonly used types
pub use config::EditorConfig;
pub use models::*;
pub use operations::{DropPosition, NodeEdit, NodeOperationError};
pub use services::*;

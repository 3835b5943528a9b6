//! Editor Services
//!
//! - `DocumentContext` - handle for one open document: snapshot swapping,
//!   selection, drag state, CSS editing, persistence and change events
//!
//! The context coordinates the pure operations in [`crate::operations`] with
//! the persistence seam in [`crate::db`].

pub mod document_context;
pub mod error;

pub use document_context::DocumentContext;
pub use error::DocumentError;

//! Service Layer Error Types
//!
//! Errors surfaced by the document context. Tree misses that the editor
//! tolerates never reach this type; see
//! [`NodeOperationError::is_tolerated`](crate::operations::NodeOperationError::is_tolerated).

use crate::db::StoreError;
use crate::models::ValidationError;
use crate::operations::NodeOperationError;
use thiserror::Error;

/// Document context errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DocumentError {
    /// Tree operation rejected
    #[error("Operation failed: {0}")]
    Operation(#[from] NodeOperationError),

    /// Persistence failed
    #[error("Store operation failed: {0}")]
    Store(#[from] StoreError),

    /// Stored content is not a valid document
    #[error("Invalid document: {0}")]
    Validation(#[from] ValidationError),

    /// `save` called on a context with no store attached
    #[error("Document is not attached to a store")]
    NotAttached,
}

impl DocumentError {
    /// Whether retrying later might succeed
    pub fn is_store_failure(&self) -> bool {
        matches!(self, Self::Store(_))
    }
}

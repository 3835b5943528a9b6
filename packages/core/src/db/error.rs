//! Store Error Types
//!
//! Errors reported by [`MixStore`](super::MixStore) implementations.

use thiserror::Error;

/// Persistence errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    /// No mix with this id
    #[error("Mix {id} not found")]
    NotFound { id: i64 },

    /// Backend rejected or failed the operation
    #[error("Storage operation failed: {0}")]
    Storage(String),

    /// Backend cannot be reached
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// Content could not be encoded or decoded
    #[error("Serialization failed: {0}")]
    Serialization(String),
}

impl StoreError {
    pub fn not_found(id: i64) -> Self {
        Self::NotFound { id }
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

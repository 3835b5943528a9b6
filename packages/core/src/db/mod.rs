//! Persistence Layer
//!
//! Mixa does not own its database. Documents are stored by an external
//! backend reached through three procedures (get, create, replace), modelled
//! here as the [`MixStore`] trait:
//!
//! - `MixStore` - async persistence contract
//! - `InMemoryMixStore` - process-local implementation for tests and tools
//! - `DocumentEvent` - change notifications broadcast by open documents

mod error;
pub mod events;
mod mix_store;

pub use error::StoreError;
pub use events::DocumentEvent;
pub use mix_store::{InMemoryMixStore, MixStore};

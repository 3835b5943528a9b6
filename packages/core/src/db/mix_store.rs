//! MixStore Trait - Persistence Seam
//!
//! The editor persists documents through three procedures: fetch a mix by id,
//! create one, and replace (upsert) one. `MixStore` is that contract;
//! [`InMemoryMixStore`] implements it for tests and local tooling.
//!
//! # Examples
//!
//! ```rust
//! use mixa_core::db::{InMemoryMixStore, MixStore};
//! use mixa_core::models::MixDocument;
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let store = InMemoryMixStore::new();
//! let created = store.create_mix(MixDocument::default().to_json()?).await?;
//! let fetched = store.get_mix(created.id).await?;
//! assert_eq!(fetched.json_content, created.json_content);
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use tokio::sync::RwLock;

use super::StoreError;
use crate::models::Mix;

/// Persistence operations for mixes
///
/// Implementations must be `Send + Sync` so a store can be shared by
/// document handles across tasks.
#[async_trait]
pub trait MixStore: Send + Sync {
    /// Fetch a mix; `StoreError::NotFound` when the id is unknown
    async fn get_mix(&self, id: i64) -> Result<Mix, StoreError>;

    /// Create a mix with a store-assigned id
    async fn create_mix(&self, json_content: Value) -> Result<Mix, StoreError>;

    /// Replace the content of mix `id`, creating it when missing
    async fn replace_mix(&self, id: i64, json_content: Value) -> Result<Mix, StoreError>;
}

/// Process-local store keyed by monotonically assigned ids
#[derive(Debug)]
pub struct InMemoryMixStore {
    mixes: RwLock<HashMap<i64, Mix>>,
    next_id: AtomicI64,
    offline: AtomicBool,
}

impl Default for InMemoryMixStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryMixStore {
    pub fn new() -> Self {
        Self {
            mixes: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
            offline: AtomicBool::new(false),
        }
    }

    /// Simulate an unreachable backend: every call fails with `Unavailable`
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub async fn len(&self) -> usize {
        self.mixes.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.mixes.read().await.is_empty()
    }

    fn check_online(&self) -> Result<(), StoreError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::unavailable("in-memory store is offline"));
        }
        Ok(())
    }
}

#[async_trait]
impl MixStore for InMemoryMixStore {
    async fn get_mix(&self, id: i64) -> Result<Mix, StoreError> {
        self.check_online()?;
        self.mixes
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(id))
    }

    async fn create_mix(&self, json_content: Value) -> Result<Mix, StoreError> {
        self.check_online()?;
        let mut mixes = self.mixes.write().await;

        let mut id = self.next_id.fetch_add(1, Ordering::SeqCst);
        while mixes.contains_key(&id) {
            id = self.next_id.fetch_add(1, Ordering::SeqCst);
        }

        let now = Utc::now();
        let mix = Mix {
            id,
            json_content,
            created_at: now,
            updated_at: now,
        };
        mixes.insert(id, mix.clone());

        tracing::debug!("Created mix {}", id);
        Ok(mix)
    }

    async fn replace_mix(&self, id: i64, json_content: Value) -> Result<Mix, StoreError> {
        self.check_online()?;
        let mut mixes = self.mixes.write().await;
        let now = Utc::now();

        let mix = match mixes.get(&id) {
            Some(existing) => Mix {
                id,
                json_content,
                created_at: existing.created_at,
                updated_at: now,
            },
            None => Mix {
                id,
                json_content,
                created_at: now,
                updated_at: now,
            },
        };
        mixes.insert(id, mix.clone());

        // Keep generated ids clear of explicitly upserted ones
        self.next_id.fetch_max(id.saturating_add(1), Ordering::SeqCst);

        tracing::debug!("Replaced mix {}", id);
        Ok(mix)
    }
}

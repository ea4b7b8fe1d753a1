use async_trait::async_trait;

use crate::{Draft, DraftKey, Result};

/// Core trait for draft store implementations.
///
/// A draft store persists in-progress wizard data under a string key so a
/// flow can be resumed after the client session is torn down. All
/// implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait DraftStore: Send + Sync {
    /// Persists a draft under its key.
    ///
    /// Saving a key that already holds a draft overwrites it.
    async fn save(&self, draft: Draft) -> Result<()>;

    /// Retrieves the draft stored under a key.
    ///
    /// Returns `None` if no draft exists for the key.
    async fn load(&self, key: &DraftKey) -> Result<Option<Draft>>;

    /// Removes the draft stored under a key.
    ///
    /// Clearing a key with no draft is a no-op.
    async fn clear(&self, key: &DraftKey) -> Result<()>;
}

/// Extension trait providing convenience methods for draft stores.
#[async_trait]
pub trait DraftStoreExt: DraftStore {
    /// Checks whether a draft exists under the key.
    async fn contains(&self, key: &DraftKey) -> Result<bool> {
        Ok(self.load(key).await?.is_some())
    }

    /// Serializes and saves a state value under the key.
    async fn checkpoint<T: serde::Serialize + Sync>(
        &self,
        key: DraftKey,
        state: &T,
    ) -> Result<()> {
        self.save(Draft::from_state(key, state)?).await
    }
}

// Blanket implementation for all DraftStore implementations
impl<T: DraftStore + ?Sized> DraftStoreExt for T {}

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{Draft, DraftKey, Result, store::DraftStore};

/// In-memory draft store.
///
/// The reference implementation: one scoped key-value map guarded by an
/// async lock. The whole system's persistence requirement is the wizard
/// checkpoint, so this is also the store used in production wiring.
#[derive(Clone, Default)]
pub struct InMemoryDraftStore {
    drafts: Arc<RwLock<HashMap<DraftKey, Draft>>>,
}

impl InMemoryDraftStore {
    /// Creates a new empty draft store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of drafts currently stored.
    pub async fn draft_count(&self) -> usize {
        self.drafts.read().await.len()
    }
}

#[async_trait]
impl DraftStore for InMemoryDraftStore {
    async fn save(&self, draft: Draft) -> Result<()> {
        metrics::counter!("draft_saves_total").increment(1);
        tracing::debug!(key = %draft.key, "saving draft");
        self.drafts.write().await.insert(draft.key.clone(), draft);
        Ok(())
    }

    async fn load(&self, key: &DraftKey) -> Result<Option<Draft>> {
        Ok(self.drafts.read().await.get(key).cloned())
    }

    async fn clear(&self, key: &DraftKey) -> Result<()> {
        tracing::debug!(%key, "clearing draft");
        self.drafts.write().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::DraftStoreExt;

    fn make_draft(key: &str, step: usize) -> Draft {
        Draft::new(DraftKey::new(key), serde_json::json!({ "step": step }))
    }

    #[tokio::test]
    async fn save_and_load() {
        let store = InMemoryDraftStore::new();
        let key = DraftKey::new("signup/test");

        store.save(make_draft("signup/test", 1)).await.unwrap();

        let loaded = store.load(&key).await.unwrap();
        assert!(loaded.is_some());
        assert_eq!(loaded.unwrap().state["step"], 1);
    }

    #[tokio::test]
    async fn load_missing_key_returns_none() {
        let store = InMemoryDraftStore::new();
        let loaded = store.load(&DraftKey::new("missing")).await.unwrap();
        assert!(loaded.is_none());
    }

    #[tokio::test]
    async fn save_overwrites_existing_draft() {
        let store = InMemoryDraftStore::new();
        let key = DraftKey::new("signup/test");

        store.save(make_draft("signup/test", 1)).await.unwrap();
        store.save(make_draft("signup/test", 2)).await.unwrap();

        let loaded = store.load(&key).await.unwrap().unwrap();
        assert_eq!(loaded.state["step"], 2);
        assert_eq!(store.draft_count().await, 1);
    }

    #[tokio::test]
    async fn clear_removes_draft() {
        let store = InMemoryDraftStore::new();
        let key = DraftKey::new("signup/test");

        store.save(make_draft("signup/test", 1)).await.unwrap();
        store.clear(&key).await.unwrap();

        assert!(store.load(&key).await.unwrap().is_none());
        assert_eq!(store.draft_count().await, 0);
    }

    #[tokio::test]
    async fn clear_missing_key_is_noop() {
        let store = InMemoryDraftStore::new();
        let result = store.clear(&DraftKey::new("missing")).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn contains_reflects_presence() {
        let store = InMemoryDraftStore::new();
        let key = DraftKey::new("signup/test");

        assert!(!store.contains(&key).await.unwrap());
        store.save(make_draft("signup/test", 1)).await.unwrap();
        assert!(store.contains(&key).await.unwrap());
    }

    #[tokio::test]
    async fn checkpoint_serializes_state() {
        #[derive(serde::Serialize)]
        struct State {
            current_index: usize,
        }

        let store = InMemoryDraftStore::new();
        let key = DraftKey::new("signup/test");

        store
            .checkpoint(key.clone(), &State { current_index: 3 })
            .await
            .unwrap();

        let loaded = store.load(&key).await.unwrap().unwrap();
        assert_eq!(loaded.state["current_index"], 3);
    }
}

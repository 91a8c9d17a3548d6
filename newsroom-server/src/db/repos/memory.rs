//! In-process feedback store
//!
//! Backs `serve --in-memory` and the HTTP tests. Records live in
//! insertion order; a single write lock makes each operation atomic.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{FeedbackStore, StoreError};
use crate::models::{Feedback, FeedbackDraft, FeedbackId};

#[derive(Debug, Default)]
pub struct MemoryFeedbackStore {
    records: RwLock<Vec<Feedback>>,
}

impl MemoryFeedbackStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl FeedbackStore for MemoryFeedbackStore {
    async fn insert(&self, draft: FeedbackDraft) -> Result<Feedback, StoreError> {
        let record = Feedback::from_draft(FeedbackId::generate(), draft, Utc::now());
        self.records.write().await.push(record.clone());
        Ok(record)
    }

    async fn list(&self) -> Result<Vec<Feedback>, StoreError> {
        let mut items: Vec<Feedback> = self.records.read().await.iter().rev().cloned().collect();
        // Stable sort keeps newer inserts ahead when timestamps tie.
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(items)
    }

    async fn replace(&self, id: FeedbackId, draft: FeedbackDraft) -> Result<Feedback, StoreError> {
        let mut records = self.records.write().await;
        let record = records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(StoreError::NotFound { id })?;
        record.apply(draft);
        Ok(record.clone())
    }

    async fn remove(&self, id: FeedbackId) -> Result<(), StoreError> {
        let mut records = self.records.write().await;
        let pos = records
            .iter()
            .position(|r| r.id == id)
            .ok_or(StoreError::NotFound { id })?;
        records.remove(pos);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str) -> FeedbackDraft {
        FeedbackDraft::new(Some(name.into()), Some("a@x.com".into()), Some("hi".into())).unwrap()
    }

    #[tokio::test]
    async fn insert_assigns_identity() {
        let store = MemoryFeedbackStore::new();
        let a = store.insert(draft("A")).await.unwrap();
        let b = store.insert(draft("B")).await.unwrap();

        assert_ne!(a.id, b.id);
        assert!(b.created_at >= a.created_at);
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn list_is_newest_first() {
        let store = MemoryFeedbackStore::new();
        for name in ["one", "two", "three"] {
            store.insert(draft(name)).await.unwrap();
        }

        let names: Vec<_> = store.list().await.unwrap().into_iter().map(|f| f.name).collect();
        assert_eq!(names, ["three", "two", "one"]);
    }

    #[tokio::test]
    async fn replace_missing_leaves_store_unchanged() {
        let store = MemoryFeedbackStore::new();
        let kept = store.insert(draft("A")).await.unwrap();

        let err = store.replace(FeedbackId::generate(), draft("B")).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
        assert_eq!(store.list().await.unwrap(), vec![kept]);
    }

    #[tokio::test]
    async fn remove_twice_is_not_found() {
        let store = MemoryFeedbackStore::new();
        let a = store.insert(draft("A")).await.unwrap();

        store.remove(a.id).await.unwrap();
        assert!(store.is_empty().await);

        let err = store.remove(a.id).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { id } if id == a.id));
    }
}

//! In-memory document store
//!
//! Reference [`DocumentStore`] implementation backing tests and small
//! deployments. Collections are plain vectors behind an async lock; upsert
//! is atomic with respect to other store calls because every operation
//! holds the collection map's write lock for its full duration.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::ModelResult;
use crate::model::Document;
use crate::query::Criteria;

use super::DocumentStore;

const CREATED_AT: &str = "createdAt";
const UPDATED_AT: &str = "updatedAt";

/// Vector-backed store keyed by collection name
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Vec<Document>>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of documents in the given collection
    pub async fn count(&self, collection: &str) -> usize {
        self.collections
            .read()
            .await
            .get(collection)
            .map(|docs| docs.len())
            .unwrap_or(0)
    }

    fn stamp_created(document: &mut Document) {
        let now = Utc::now().to_rfc3339();
        document.set_field(CREATED_AT, now.clone());
        document.set_field(UPDATED_AT, now);
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find_one(
        &self,
        collection: &str,
        criteria: &Criteria,
    ) -> ModelResult<Option<Document>> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.iter().find(|doc| criteria.matches(doc)).cloned()))
    }

    async fn find(
        &self,
        collection: &str,
        criteria: &Criteria,
        limit: Option<usize>,
    ) -> ModelResult<Vec<Document>> {
        let collections = self.collections.read().await;
        let matched = collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .filter(|doc| criteria.matches(doc))
                    .take(limit.unwrap_or(usize::MAX))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        Ok(matched)
    }

    async fn find_one_and_upsert(
        &self,
        collection: &str,
        criteria: &Criteria,
        replacement: Document,
    ) -> ModelResult<Document> {
        let mut collections = self.collections.write().await;
        let docs = collections.entry(collection.to_string()).or_default();

        if let Some(existing) = docs.iter_mut().find(|doc| criteria.matches(doc)) {
            let created_at = existing.field(CREATED_AT).cloned();
            existing.replace_fields(&replacement);
            if let Some(created_at) = created_at {
                existing.set_field(CREATED_AT, created_at);
            }
            existing.set_field(UPDATED_AT, Utc::now().to_rfc3339());
            debug!(collection, "upsert replaced existing document");
            return Ok(existing.clone());
        }

        let mut created = replacement;
        Self::stamp_created(&mut created);
        debug!(collection, id = %created.id(), "upsert created document");
        docs.push(created.clone());
        Ok(created)
    }

    async fn find_one_and_delete(
        &self,
        collection: &str,
        criteria: &Criteria,
    ) -> ModelResult<Option<Document>> {
        let mut collections = self.collections.write().await;
        let Some(docs) = collections.get_mut(collection) else {
            return Ok(None);
        };
        let position = docs.iter().position(|doc| criteria.matches(doc));
        Ok(position.map(|index| docs.remove(index)))
    }

    async fn insert_many(
        &self,
        collection: &str,
        documents: Vec<Document>,
    ) -> ModelResult<Vec<Document>> {
        let mut collections = self.collections.write().await;
        let docs = collections.entry(collection.to_string()).or_default();

        let mut created = Vec::with_capacity(documents.len());
        for mut document in documents {
            Self::stamp_created(&mut document);
            docs.push(document.clone());
            created.push(document);
        }
        debug!(collection, count = created.len(), "inserted documents");
        Ok(created)
    }

    async fn delete_many(&self, collection: &str, criteria: &Criteria) -> ModelResult<u64> {
        let mut collections = self.collections.write().await;
        let Some(docs) = collections.get_mut(collection) else {
            return Ok(0);
        };
        let before = docs.len();
        docs.retain(|doc| !criteria.matches(doc));
        Ok((before - docs.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_find_on_missing_collection_is_empty() {
        let store = MemoryStore::new();
        let criteria = Criteria::new();
        assert!(store.find_one("photos", &criteria).await.unwrap().is_none());
        assert!(store.find("photos", &criteria, None).await.unwrap().is_empty());
        assert_eq!(store.delete_many("photos", &criteria).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_insert_preserves_order_and_stamps_timestamps() {
        let store = MemoryStore::new();
        let docs = vec![
            Document::new().with_field("name", "a"),
            Document::new().with_field("name", "b"),
        ];
        let ids: Vec<_> = docs.iter().map(|d| d.id()).collect();

        let created = store.insert_many("photos", docs).await.unwrap();
        assert_eq!(created.len(), 2);
        assert_eq!(created[0].id(), ids[0]);
        assert_eq!(created[1].id(), ids[1]);
        assert!(created[0].field("createdAt").is_some());
        assert!(created[0].field("updatedAt").is_some());
    }

    #[tokio::test]
    async fn test_upsert_creates_then_replaces() {
        let store = MemoryStore::new();
        let criteria = Criteria::new().with("ownerId", "abc");

        let first = store
            .find_one_and_upsert(
                "photos",
                &criteria,
                Document::new().with_field("ownerId", "abc").with_field("name", "v1"),
            )
            .await
            .unwrap();
        assert_eq!(store.count("photos").await, 1);
        let created_at = first.field("createdAt").cloned().unwrap();

        let second = store
            .find_one_and_upsert(
                "photos",
                &criteria,
                Document::new().with_field("ownerId", "abc").with_field("name", "v2"),
            )
            .await
            .unwrap();

        assert_eq!(store.count("photos").await, 1);
        assert_eq!(second.id(), first.id());
        assert_eq!(second.field("name").and_then(|v| v.as_str()), Some("v2"));
        assert_eq!(second.field("createdAt").unwrap(), &created_at);
    }

    #[tokio::test]
    async fn test_find_one_and_delete() {
        let store = MemoryStore::new();
        let doc = Document::new().with_field("name", "a");
        let id = doc.id();
        store.insert_many("photos", vec![doc]).await.unwrap();

        let removed = store
            .find_one_and_delete("photos", &Criteria::new().with("name", "a"))
            .await
            .unwrap();
        assert_eq!(removed.unwrap().id(), id);
        assert_eq!(store.count("photos").await, 0);

        let missing = store
            .find_one_and_delete("photos", &Criteria::new().with("name", "a"))
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_delete_many_counts_removals() {
        let store = MemoryStore::new();
        store
            .insert_many(
                "photos",
                vec![
                    Document::new().with_field("kind", "front"),
                    Document::new().with_field("kind", "front"),
                    Document::new().with_field("kind", "back"),
                ],
            )
            .await
            .unwrap();

        let removed = store
            .delete_many("photos", &Criteria::new().with("kind", "front"))
            .await
            .unwrap();
        assert_eq!(removed, 2);
        assert_eq!(store.count("photos").await, 1);
    }
}

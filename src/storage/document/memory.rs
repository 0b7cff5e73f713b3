//! In-process document store backed by a `tokio::sync::RwLock`.
//!
//! Used by tests and by `STORE_BACKEND=memory`. Every operation holds the lock
//! for its whole duration, so conditional inserts and filtered updates are atomic.

use super::{Document, DocumentStore, Filter, Window, ID_FIELD};
use async_trait::async_trait;
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Default)]
struct Collection {
    /// Insertion order.
    docs: Vec<Document>,
    next_id: i64,
}

impl Collection {
    fn insert(&mut self, mut doc: Document) -> Document {
        let id = self.next_id;
        self.next_id += 1;
        doc.insert(ID_FIELD.to_string(), JsonValue::from(id));
        self.docs.push(doc.clone());
        doc
    }

    fn position(&self, filter: &Filter) -> Option<usize> {
        self.docs.iter().position(|d| filter.matches(d))
    }
}

#[derive(Default)]
pub struct InMemoryDocumentStore {
    collections: RwLock<HashMap<String, Collection>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn init(&self) -> anyhow::Result<()> {
        Ok(())
    }

    async fn ping(&self) -> anyhow::Result<()> {
        Ok(())
    }

    async fn find_one(&self, collection: &str, filter: &Filter) -> anyhow::Result<Option<Document>> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|c| c.docs.iter().find(|d| filter.matches(d)).cloned()))
    }

    async fn find(
        &self,
        collection: &str,
        filter: &Filter,
        window: Window,
    ) -> anyhow::Result<Vec<Document>> {
        let collections = self.collections.read().await;
        let Some(c) = collections.get(collection) else {
            return Ok(Vec::new());
        };
        let skip = usize::try_from(window.skip).unwrap_or(usize::MAX);
        let limit = window
            .limit
            .map(|l| usize::try_from(l).unwrap_or(usize::MAX))
            .unwrap_or(usize::MAX);
        Ok(c.docs
            .iter()
            .filter(|d| filter.matches(d))
            .skip(skip)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn count(&self, collection: &str) -> anyhow::Result<u64> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .map(|c| c.docs.len() as u64)
            .unwrap_or(0))
    }

    async fn insert(&self, collection: &str, doc: Document) -> anyhow::Result<Document> {
        let mut collections = self.collections.write().await;
        Ok(collections
            .entry(collection.to_string())
            .or_default()
            .insert(doc))
    }

    async fn insert_unless_exists(
        &self,
        collection: &str,
        guard: &Filter,
        doc: Document,
    ) -> anyhow::Result<Option<Document>> {
        let mut collections = self.collections.write().await;
        let c = collections.entry(collection.to_string()).or_default();
        if c.position(guard).is_some() {
            return Ok(None);
        }
        Ok(Some(c.insert(doc)))
    }

    async fn update_one(
        &self,
        collection: &str,
        filter: &Filter,
        mut fields: Document,
    ) -> anyhow::Result<Option<Document>> {
        fields.remove(ID_FIELD);
        let mut collections = self.collections.write().await;
        let Some(c) = collections.get_mut(collection) else {
            return Ok(None);
        };
        let Some(idx) = c.position(filter) else {
            return Ok(None);
        };
        let doc = &mut c.docs[idx];
        for (k, v) in fields {
            doc.insert(k, v);
        }
        Ok(Some(doc.clone()))
    }

    async fn delete_one(&self, collection: &str, filter: &Filter) -> anyhow::Result<bool> {
        let mut collections = self.collections.write().await;
        let Some(c) = collections.get_mut(collection) else {
            return Ok(false);
        };
        match c.position(filter) {
            Some(idx) => {
                c.docs.remove(idx);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

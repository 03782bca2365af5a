use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::store::{Document, DocumentStore, Fields, StoreError, WriteBatch, WriteOp};

type Collections = BTreeMap<String, BTreeMap<String, Fields>>;

/// In-process DocumentStore. Each batch is applied under a single write lock.
#[derive(Clone, Default)]
pub struct MemoryStore {
    collections: Arc<RwLock<Collections>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch one document's fields
    pub async fn get(&self, collection: &str, id: &str) -> Option<Fields> {
        let collections = self.collections.read().await;
        collections.get(collection).and_then(|docs| docs.get(id)).cloned()
    }

    /// Write a document directly, bypassing batches (seeding helper)
    pub async fn insert(&self, collection: &str, id: &str, fields: Fields) {
        let mut collections = self.collections.write().await;
        collections
            .entry(collection.to_string())
            .or_default()
            .insert(id.to_string(), fields);
    }

    pub async fn count(&self, collection: &str) -> usize {
        let collections = self.collections.read().await;
        collections.get(collection).map_or(0, |docs| docs.len())
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn list_documents(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .map(|(id, fields)| Document {
                        id: id.clone(),
                        fields: fields.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn commit(&self, batch: WriteBatch) -> Result<(), StoreError> {
        let mut collections = self.collections.write().await;
        for op in batch.into_ops() {
            match op {
                WriteOp::Set {
                    collection,
                    id,
                    fields,
                } => {
                    collections.entry(collection).or_default().insert(id, fields);
                }
                WriteOp::Delete { collection, id } => {
                    if let Some(docs) = collections.get_mut(&collection) {
                        docs.remove(&id);
                        if docs.is_empty() {
                            collections.remove(&collection);
                        }
                    }
                }
            }
        }
        Ok(())
    }

    async fn set_merge(&self, collection: &str, id: &str, fields: Fields) -> Result<(), StoreError> {
        let mut collections = self.collections.write().await;
        let existing = collections
            .entry(collection.to_string())
            .or_default()
            .entry(id.to_string())
            .or_default();
        for (key, value) in fields {
            existing.insert(key, value);
        }
        Ok(())
    }
}

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use docreset::config::ResetSettings;
use docreset::database::{Document, DocumentStore, Fields, MemoryStore, StoreError, WriteBatch};
use docreset::reset::ResetService;
use docreset::storage::MemoryObjectStore;
use serde_json::Value;

pub const JWT_SECRET: &str = "integration-secret";

pub fn fields(value: Value) -> Fields {
    value.as_object().cloned().expect("fields must be a JSON object")
}

/// MemoryStore wrapper that counts calls and can fail a chosen commit
#[derive(Clone, Default)]
pub struct RecordingStore {
    pub inner: MemoryStore,
    calls: Arc<AtomicUsize>,
    commits: Arc<AtomicUsize>,
    fail_on_commit: Option<usize>,
    unhealthy: bool,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the n-th commit (1-based); earlier commits go through
    pub fn failing_on_commit(n: usize) -> Self {
        Self {
            fail_on_commit: Some(n),
            ..Self::default()
        }
    }

    /// Store whose health check always fails
    pub fn unhealthy() -> Self {
        Self {
            unhealthy: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn commits(&self) -> usize {
        self.commits.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DocumentStore for RecordingStore {
    async fn health_check(&self) -> Result<(), StoreError> {
        if self.unhealthy {
            return Err(StoreError::Unavailable("injected health failure".to_string()));
        }
        Ok(())
    }

    async fn list_documents(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.list_documents(collection).await
    }

    async fn commit(&self, batch: WriteBatch) -> Result<(), StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let n = self.commits.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail_on_commit == Some(n) {
            return Err(StoreError::Unavailable(format!("injected failure on commit {}", n)));
        }
        self.inner.commit(batch).await
    }

    async fn set_merge(&self, collection: &str, id: &str, fields: Fields) -> Result<(), StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.set_merge(collection, id, fields).await
    }
}

pub fn service(
    store: &RecordingStore,
    objects: &MemoryObjectStore,
    settings: ResetSettings,
) -> ResetService {
    ResetService::new(Arc::new(store.clone()), Arc::new(objects.clone()), settings)
}

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::{ObjectRef, ObjectStore, StorageError};

/// In-process object store keyed by (bucket, object)
#[derive(Clone, Default)]
pub struct MemoryObjectStore {
    objects: Arc<RwLock<HashMap<(String, String), Vec<u8>>>>,
}

impl MemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put(&self, bucket: &str, object: &str, bytes: impl Into<Vec<u8>>) {
        let mut objects = match self.objects.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        objects.insert((bucket.to_string(), object.to_string()), bytes.into());
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn download(&self, object: &ObjectRef) -> Result<Vec<u8>, StorageError> {
        let objects = match self.objects.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        objects
            .get(&(object.bucket.clone(), object.object.clone()))
            .cloned()
            .ok_or_else(|| StorageError::NotFound(object.to_string()))
    }
}

use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;

/// Field set of a single document
pub type Fields = Map<String, Value>;

/// Errors from a DocumentStore backend
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Invalid database URL")]
    InvalidDatabaseUrl,

    #[error("Document {collection}/{id} has non-object data")]
    CorruptDocument { collection: String, id: String },

    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// A stored document: its key within the collection and its fields
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub fields: Fields,
}

/// One operation inside a WriteBatch
#[derive(Debug, Clone, PartialEq)]
pub enum WriteOp {
    /// Replace the document's full field set, creating it if absent
    Set {
        collection: String,
        id: String,
        fields: Fields,
    },
    Delete {
        collection: String,
        id: String,
    },
}

/// Ordered set of writes committed all-or-nothing
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WriteBatch {
    ops: Vec<WriteOp>,
}

impl WriteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, collection: &str, id: impl Into<String>, fields: Fields) -> &mut Self {
        self.ops.push(WriteOp::Set {
            collection: collection.to_string(),
            id: id.into(),
            fields,
        });
        self
    }

    pub fn delete(&mut self, collection: &str, id: impl Into<String>) -> &mut Self {
        self.ops.push(WriteOp::Delete {
            collection: collection.to_string(),
            id: id.into(),
        });
        self
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn into_ops(self) -> Vec<WriteOp> {
        self.ops
    }
}

/// Document database addressed by collection path and document id.
///
/// `commit` must apply every operation of the batch or none of them.
/// Separate calls are independent: nothing spans two commits.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// All documents directly under `collection`
    async fn list_documents(&self, collection: &str) -> Result<Vec<Document>, StoreError>;

    /// Apply a batch atomically
    async fn commit(&self, batch: WriteBatch) -> Result<(), StoreError>;

    /// Write `fields` into one document, keeping fields not named in `fields`
    async fn set_merge(&self, collection: &str, id: &str, fields: Fields) -> Result<(), StoreError>;

    /// Cheap round trip to the backend
    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }

    /// Fresh unique document key
    fn generate_id(&self) -> String {
        uuid::Uuid::new_v4().simple().to_string()
    }
}

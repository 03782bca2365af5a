pub mod gcs;
pub mod memory;

use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

pub use gcs::GcsObjectStore;
pub use memory::MemoryObjectStore;

/// Prefix marking a default-values source as an object-store reference
pub const GS_PREFIX: &str = "gs://";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Invalid object reference '{0}': expected gs://<bucket>/<path>")]
    InvalidReference(String),

    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("Object store returned HTTP {status} for {object}")]
    Status { status: u16, object: String },

    #[error("Invalid storage URL: {0}")]
    InvalidUrl(String),

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// A bucket + object path pair parsed from `gs://bucket/path/to/object`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectRef {
    pub bucket: String,
    pub object: String,
}

impl ObjectRef {
    /// Split at the first `/` after the scheme. Both halves must be non-empty.
    pub fn parse(reference: &str) -> Result<Self, StorageError> {
        let rest = reference
            .strip_prefix(GS_PREFIX)
            .ok_or_else(|| StorageError::InvalidReference(reference.to_string()))?;

        match rest.split_once('/') {
            Some((bucket, object)) if !bucket.is_empty() && !object.is_empty() => Ok(Self {
                bucket: bucket.to_string(),
                object: object.to_string(),
            }),
            _ => Err(StorageError::InvalidReference(reference.to_string())),
        }
    }
}

impl fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}/{}", GS_PREFIX, self.bucket, self.object)
    }
}

/// Read-only access to objects in a remote store
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Raw bytes of the object
    async fn download(&self, object: &ObjectRef) -> Result<Vec<u8>, StorageError>;
}

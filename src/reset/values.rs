use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error};

use crate::database::Fields;
use crate::storage::{ObjectRef, ObjectStore, StorageError, GS_PREFIX};

/// Parsed default values. Produced only by DefaultValuesLoader.
#[derive(Debug, Clone, PartialEq)]
pub enum DefaultValue {
    /// One mapping: a document's fields, or document key -> fields for a collection
    Single(Fields),
    /// One mapping per document, each optionally keyed by its `id` field
    Many(Vec<Fields>),
}

impl DefaultValue {
    pub fn shape(&self) -> &'static str {
        match self {
            DefaultValue::Single(_) => "object",
            DefaultValue::Many(_) => "array",
        }
    }

    /// Number of top-level entries: mapping keys or array elements
    pub fn entry_count(&self) -> usize {
        match self {
            DefaultValue::Single(map) => map.len(),
            DefaultValue::Many(items) => items.len(),
        }
    }
}

impl TryFrom<Value> for DefaultValue {
    type Error = LoadError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(DefaultValue::Single(map)),
            Value::Array(items) => items
                .into_iter()
                .enumerate()
                .map(|(index, item)| match item {
                    Value::Object(map) => Ok(map),
                    other => Err(LoadError::UnsupportedShape(format!(
                        "{} at index {}",
                        json_kind(&other),
                        index
                    ))),
                })
                .collect::<Result<Vec<_>, _>>()
                .map(DefaultValue::Many),
            other => Err(LoadError::UnsupportedShape(json_kind(&other).to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadErrorKind {
    InvalidJson,
    RemoteFetchFailed,
    ParseFailed,
    UnsupportedShape,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("DEFAULT_VALUES parameter must be a valid JSON string: {0}")]
    InvalidJson(#[source] serde_json::Error),

    #[error("Failed to load default values from {reference}: {source}")]
    RemoteFetchFailed {
        reference: String,
        source: StorageError,
    },

    #[error("Default values at {reference} are not valid JSON: {reason}")]
    ParseFailed { reference: String, reason: String },

    #[error("Default values must be a JSON object or an array of objects, found {0}")]
    UnsupportedShape(String),
}

impl LoadError {
    pub fn kind(&self) -> LoadErrorKind {
        match self {
            LoadError::InvalidJson(_) => LoadErrorKind::InvalidJson,
            LoadError::RemoteFetchFailed { .. } => LoadErrorKind::RemoteFetchFailed,
            LoadError::ParseFailed { .. } => LoadErrorKind::ParseFailed,
            LoadError::UnsupportedShape(_) => LoadErrorKind::UnsupportedShape,
        }
    }
}

/// Resolves a default-values source (inline JSON or `gs://` reference). No caching.
#[derive(Clone)]
pub struct DefaultValuesLoader {
    objects: Arc<dyn ObjectStore>,
}

impl DefaultValuesLoader {
    pub fn new(objects: Arc<dyn ObjectStore>) -> Self {
        Self { objects }
    }

    pub async fn load(&self, source: &str) -> Result<DefaultValue, LoadError> {
        let value = if source.starts_with(GS_PREFIX) {
            self.load_remote(source).await?
        } else {
            serde_json::from_str::<Value>(source).map_err(|e| {
                error!("Error parsing default values JSON: {}", e);
                LoadError::InvalidJson(e)
            })?
        };

        DefaultValue::try_from(value)
    }

    async fn load_remote(&self, reference: &str) -> Result<Value, LoadError> {
        let fetch_failed = |source: StorageError| {
            error!("Error loading default values from {}: {}", reference, source);
            LoadError::RemoteFetchFailed {
                reference: reference.to_string(),
                source,
            }
        };
        let parse_failed = |reason: String| {
            error!("Error parsing default values from {}: {}", reference, reason);
            LoadError::ParseFailed {
                reference: reference.to_string(),
                reason,
            }
        };

        let object = ObjectRef::parse(reference).map_err(fetch_failed)?;
        let bytes = self.objects.download(&object).await.map_err(fetch_failed)?;
        debug!("Fetched {} bytes from {}", bytes.len(), object);

        let text = String::from_utf8(bytes).map_err(|e| parse_failed(e.to_string()))?;
        serde_json::from_str(&text).map_err(|e| parse_failed(e.to_string()))
    }
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

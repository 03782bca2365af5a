use serde::Serialize;
use serde_json::Value;
use tracing::info;

use super::values::{json_kind, DefaultValue};
use super::ResetError;
use crate::config::ResetType;
use crate::database::{collection_path, DocumentStore, Fields, WriteBatch};

/// Field that names the document key in array-shaped defaults
pub const ID_FIELD: &str = "id";

/// Counts from one collection reset
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CollectionResetSummary {
    pub deleted: usize,
    pub created: usize,
}

/// Replace every document under `path` with the documents described by `values`.
///
/// Runs as two batches: delete-all, then create. Each batch is atomic on its
/// own but the pair is not; a failure after the delete commits leaves the
/// collection empty. The new document set is built and validated before
/// anything is read or written.
pub async fn reset_collection(
    store: &dyn DocumentStore,
    path: &str,
    values: &DefaultValue,
) -> Result<CollectionResetSummary, ResetError> {
    let collection = collection_path(path)?;
    let documents = plan_documents(store, values)?;

    info!(
        "Resetting collection at path: {} ({} default entries, {})",
        collection,
        values.entry_count(),
        values.shape()
    );

    let existing = store.list_documents(&collection).await?;
    let deleted = existing.len();
    if !existing.is_empty() {
        let mut batch = WriteBatch::new();
        for doc in existing {
            batch.delete(&collection, doc.id);
        }
        store.commit(batch).await?;
        info!("Deleted {} documents from collection {}", deleted, collection);
    }

    let mut batch = WriteBatch::new();
    for (id, fields) in documents {
        batch.set(&collection, id, fields);
    }
    let created = batch.len();
    if !batch.is_empty() {
        store.commit(batch).await?;
    }

    info!("Reset collection {} with default values ({} documents)", collection, created);
    Ok(CollectionResetSummary { deleted, created })
}

/// Keyed document set for a collection reset
fn plan_documents(
    store: &dyn DocumentStore,
    values: &DefaultValue,
) -> Result<Vec<(String, Fields)>, ResetError> {
    match values {
        DefaultValue::Many(items) => items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                let key = document_key(item).map_err(|reason| {
                    shape_error(format!("element {}: {}", index, reason))
                })?;
                Ok(match key {
                    Some(id) => {
                        let mut fields = item.clone();
                        fields.remove(ID_FIELD);
                        (id, fields)
                    }
                    None => (store.generate_id(), item.clone()),
                })
            })
            .collect(),
        DefaultValue::Single(map) => map
            .iter()
            .map(|(key, value)| {
                validate_key(key).map_err(shape_error)?;
                match value {
                    Value::Object(fields) => Ok((key.clone(), fields.clone())),
                    other => Err(shape_error(format!(
                        "document '{}' must be an object, found {}",
                        key,
                        json_kind(other)
                    ))),
                }
            })
            .collect(),
    }
}

/// Key carried by an array element. Falsy ids (null, false, 0, "") count as absent.
fn document_key(item: &Fields) -> Result<Option<String>, String> {
    match item.get(ID_FIELD) {
        None | Some(Value::Null) | Some(Value::Bool(false)) => Ok(None),
        Some(Value::String(id)) if id.is_empty() => Ok(None),
        Some(Value::Number(n)) if n.as_f64() == Some(0.0) => Ok(None),
        Some(Value::String(id)) => {
            validate_key(id)?;
            Ok(Some(id.clone()))
        }
        Some(other) => Err(format!("'id' must be a string, found {}", json_kind(other))),
    }
}

fn validate_key(key: &str) -> Result<(), String> {
    if key.is_empty() {
        return Err("document id must not be empty".to_string());
    }
    if key.contains('/') {
        return Err(format!("document id '{}' must not contain '/'", key));
    }
    Ok(())
}

fn shape_error(reason: String) -> ResetError {
    ResetError::InvalidShape {
        reset_type: ResetType::Collection,
        reason,
    }
}

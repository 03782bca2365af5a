use tracing::info;

use super::values::DefaultValue;
use super::ResetError;
use crate::config::ResetType;
use crate::database::{split_document_path, DocumentStore, Fields};

/// Fields for a document reset. Only a single mapping fits.
pub fn document_fields(values: &DefaultValue) -> Result<&Fields, ResetError> {
    match values {
        DefaultValue::Single(fields) => Ok(fields),
        DefaultValue::Many(_) => Err(ResetError::InvalidShape {
            reset_type: ResetType::Document,
            reason: "expected a JSON object, found an array".to_string(),
        }),
    }
}

/// Merge-write `values` into the document at `path`. One write, no read.
pub async fn reset_document(
    store: &dyn DocumentStore,
    path: &str,
    values: &Fields,
) -> Result<(), ResetError> {
    let (collection, id) = split_document_path(path)?;

    info!("Resetting document at path: {}", path);
    store.set_merge(&collection, &id, values.clone()).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::MemoryStore;
    use serde_json::json;

    fn fields(value: serde_json::Value) -> Fields {
        value.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn merges_into_existing_document() {
        let store = MemoryStore::new();
        store.insert("config", "app", fields(json!({"b": 2}))).await;

        reset_document(&store, "config/app", &fields(json!({"a": 1})))
            .await
            .unwrap();

        assert_eq!(
            store.get("config", "app").await.unwrap(),
            fields(json!({"b": 2, "a": 1}))
        );
    }

    #[tokio::test]
    async fn creates_missing_document() {
        let store = MemoryStore::new();
        reset_document(&store, "users/alice/settings/ui", &fields(json!({"theme": "dark"})))
            .await
            .unwrap();

        assert_eq!(
            store.get("users/alice/settings", "ui").await.unwrap(),
            fields(json!({"theme": "dark"}))
        );
    }

    #[tokio::test]
    async fn collection_path_is_not_a_document() {
        let store = MemoryStore::new();
        let err = reset_document(&store, "config", &Fields::new()).await.unwrap_err();
        assert!(matches!(err, ResetError::InvalidPath(_)));
    }

    #[test]
    fn arrays_do_not_fit_a_document() {
        let err = document_fields(&DefaultValue::Many(vec![])).unwrap_err();
        assert!(matches!(
            err,
            ResetError::InvalidShape { reset_type: ResetType::Document, .. }
        ));
    }
}

mod common;

use anyhow::Result;
use common::{fields, RecordingStore};
use docreset::database::{DocumentStore, Fields};
use docreset::reset::{reset_collection, DefaultValue, ResetError};
use serde_json::json;

fn many(value: serde_json::Value) -> DefaultValue {
    DefaultValue::Many(
        value
            .as_array()
            .expect("array")
            .iter()
            .map(|v| v.as_object().cloned().expect("object"))
            .collect(),
    )
}

#[tokio::test]
async fn array_defaults_replace_collection_and_strip_ids() -> Result<()> {
    let store = RecordingStore::new();
    store.inner.insert("items", "old", fields(json!({"stale": true}))).await;

    let values = many(json!([{"id": "x", "a": 1}, {"a": 2}]));
    let summary = reset_collection(&store, "items", &values).await?;

    assert_eq!(summary.deleted, 1);
    assert_eq!(summary.created, 2);
    assert!(store.inner.get("items", "old").await.is_none());
    assert_eq!(store.inner.get("items", "x").await, Some(fields(json!({"a": 1}))));

    let docs = store.list_documents("items").await?;
    assert_eq!(docs.len(), 2);
    let generated: Vec<_> = docs.iter().filter(|d| d.id != "x").collect();
    assert_eq!(generated.len(), 1);
    assert_eq!(generated[0].fields, fields(json!({"a": 2})));
    assert!(!generated[0].id.is_empty());
    Ok(())
}

#[tokio::test]
async fn mapping_defaults_seed_named_documents_only() -> Result<()> {
    let store = RecordingStore::new();
    store.inner.insert("items", "old", fields(json!({"stale": true}))).await;
    store.inner.insert("items", "docA", fields(json!({"previous": 1}))).await;

    let values = DefaultValue::Single(fields(json!({"docA": {"a": 1}, "docB": {"a": 2}})));
    reset_collection(&store, "items", &values).await?;

    let docs = store.list_documents("items").await?;
    let ids: Vec<_> = docs.iter().map(|d| d.id.as_str()).collect();
    assert_eq!(ids, vec!["docA", "docB"]);
    // Full replacement, not a merge with the old docA
    assert_eq!(store.inner.get("items", "docA").await, Some(fields(json!({"a": 1}))));
    assert_eq!(store.inner.get("items", "docB").await, Some(fields(json!({"a": 2}))));
    Ok(())
}

#[tokio::test]
async fn empty_defaults_empty_the_collection() -> Result<()> {
    let store = RecordingStore::new();
    store.inner.insert("items", "a", fields(json!({"a": 1}))).await;
    store.inner.insert("items", "b", fields(json!({"b": 1}))).await;

    let summary = reset_collection(&store, "items", &many(json!([]))).await?;

    assert_eq!(summary.deleted, 2);
    assert_eq!(summary.created, 0);
    assert_eq!(store.inner.count("items").await, 0);
    // Delete batch only; nothing to create
    assert_eq!(store.commits(), 1);
    Ok(())
}

#[tokio::test]
async fn empty_mapping_defaults_empty_the_collection() -> Result<()> {
    let store = RecordingStore::new();
    store.inner.insert("items", "a", fields(json!({"a": 1}))).await;
    store.inner.insert("items", "b", fields(json!({"b": 1}))).await;
    store.inner.insert("items", "c", fields(json!({"c": 1}))).await;

    let summary = reset_collection(&store, "items", &DefaultValue::Single(Fields::new())).await?;

    assert_eq!(summary.deleted, 3);
    assert_eq!(summary.created, 0);
    assert_eq!(store.inner.count("items").await, 0);
    assert_eq!(store.commits(), 1);
    Ok(())
}

#[tokio::test]
async fn empty_collection_skips_delete_batch() -> Result<()> {
    let store = RecordingStore::new();

    reset_collection(&store, "items", &many(json!([{"id": "only"}]))).await?;

    assert_eq!(store.commits(), 1);
    assert_eq!(store.inner.get("items", "only").await, Some(fields(json!({}))));
    Ok(())
}

#[tokio::test]
async fn failed_create_batch_leaves_collection_empty() -> Result<()> {
    let store = RecordingStore::failing_on_commit(2);
    store.inner.insert("items", "old", fields(json!({"a": 1}))).await;

    let err = reset_collection(&store, "items", &many(json!([{"id": "new"}])))
        .await
        .unwrap_err();

    assert!(matches!(err, ResetError::Write(_)));
    // Delete committed, create did not: no rollback
    assert_eq!(store.inner.count("items").await, 0);
    Ok(())
}

#[tokio::test]
async fn failed_delete_batch_keeps_existing_documents() -> Result<()> {
    let store = RecordingStore::failing_on_commit(1);
    store.inner.insert("items", "old", fields(json!({"a": 1}))).await;

    let err = reset_collection(&store, "items", &many(json!([{"id": "new"}])))
        .await
        .unwrap_err();

    assert!(matches!(err, ResetError::Write(_)));
    assert!(store.inner.get("items", "old").await.is_some());
    assert!(store.inner.get("items", "new").await.is_none());
    Ok(())
}

#[tokio::test]
async fn structural_errors_happen_before_any_store_call() -> Result<()> {
    let store = RecordingStore::new();

    let err = reset_collection(&store, "items", &many(json!([{"id": {"nested": 1}}])))
        .await
        .unwrap_err();
    assert!(matches!(err, ResetError::InvalidShape { .. }));

    let err = reset_collection(&store, "items//sub", &many(json!([])))
        .await
        .unwrap_err();
    assert!(matches!(err, ResetError::InvalidPath(_)));

    assert_eq!(store.calls(), 0);
    Ok(())
}

#[tokio::test]
async fn subcollections_are_reset_independently() -> Result<()> {
    let store = RecordingStore::new();
    store.inner.insert("users", "alice", fields(json!({"name": "Alice"}))).await;
    store.inner.insert("users/alice/tasks", "t1", fields(json!({"done": true}))).await;

    reset_collection(&store, "users/alice/tasks", &many(json!([{"id": "t2", "done": false}])))
        .await?;

    assert!(store.inner.get("users", "alice").await.is_some());
    assert!(store.inner.get("users/alice/tasks", "t1").await.is_none());
    assert_eq!(
        store.inner.get("users/alice/tasks", "t2").await,
        Some(fields(json!({"done": false})))
    );
    Ok(())
}

use serde_json::{json, Value};
use std::sync::Arc;

use crate::cli::OutputFormat;
use crate::config::ServiceConfig;
use crate::database::PgDocumentStore;
use crate::storage::GcsObjectStore;

/// Output a success message in the appropriate format
pub fn output_success(
    output_format: &OutputFormat,
    message: &str,
    data: Option<Value>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": true,
                "message": message
            });

            if let Some(data_value) = data {
                response["data"] = data_value;
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// Connect the postgres document store and make sure its table exists
pub async fn open_store(config: &ServiceConfig) -> anyhow::Result<Arc<PgDocumentStore>> {
    let store = PgDocumentStore::connect(config).await?;
    store.ensure_schema().await?;
    Ok(Arc::new(store))
}

pub fn open_object_store(config: &ServiceConfig) -> anyhow::Result<Arc<GcsObjectStore>> {
    Ok(Arc::new(GcsObjectStore::from_config(config)?))
}

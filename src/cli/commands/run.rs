use crate::cli::utils::{open_object_store, open_store, output_success};
use crate::cli::OutputFormat;
use crate::config::{ResetSettings, ServiceConfig};
use crate::reset::ResetService;

/// One scheduled reset. Settings are validated before any connection is opened.
pub async fn handle(config: ServiceConfig, output_format: OutputFormat) -> anyhow::Result<()> {
    let settings = ResetSettings::from_env();
    settings.validate()?;

    let store = open_store(&config).await?;
    let objects = open_object_store(&config)?;
    let service = ResetService::new(store, objects, settings);

    let report = service.run().await?;
    output_success(
        &output_format,
        &report.message(),
        Some(serde_json::to_value(&report)?),
    )
}

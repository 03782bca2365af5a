use anyhow::Context;
use tracing::info;

use crate::cli::utils::{open_object_store, open_store};
use crate::config::{ResetSettings, ServiceConfig};
use crate::handlers::{app, AppState};
use crate::reset::ResetService;

/// Serve POST /reset until the process is stopped
pub async fn handle(config: ServiceConfig) -> anyhow::Result<()> {
    let jwt_secret = config
        .jwt_secret
        .clone()
        .context("JWT_SECRET must be set to serve the manual reset endpoint")?;

    let store = open_store(&config).await?;
    let objects = open_object_store(&config)?;
    let service = ResetService::new(store, objects, ResetSettings::from_env());

    let router = app(AppState::new(service, jwt_secret));

    let bind_addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    info!("docreset listening on http://{}", bind_addr);
    axum::serve(listener, router).await?;
    Ok(())
}

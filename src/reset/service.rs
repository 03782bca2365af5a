use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info, warn};

use super::collection::{reset_collection, CollectionResetSummary};
use super::document::{document_fields, reset_document};
use super::values::DefaultValuesLoader;
use super::{ResetError, ResetOutcome};
use crate::auth::CallerIdentity;
use crate::config::{ResetConfig, ResetSettings, ResetType};
use crate::database::{DocumentStore, StoreError};
use crate::error::CallableError;
use crate::storage::ObjectStore;

/// What a completed reset did
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResetReport {
    pub target: String,
    pub reset_type: ResetType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection: Option<CollectionResetSummary>,
}

impl ResetReport {
    pub fn message(&self) -> String {
        format!("Successfully reset {} at path {}", self.reset_type, self.target)
    }
}

/// Validates settings, loads defaults and dispatches to the matching resetter.
/// Holds no mutable state; one instance serves every invocation.
pub struct ResetService {
    store: Arc<dyn DocumentStore>,
    loader: DefaultValuesLoader,
    settings: ResetSettings,
}

impl ResetService {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        objects: Arc<dyn ObjectStore>,
        settings: ResetSettings,
    ) -> Self {
        Self {
            store,
            loader: DefaultValuesLoader::new(objects),
            settings,
        }
    }

    /// Reachability of the document store
    pub async fn health_check(&self) -> Result<(), StoreError> {
        self.store.health_check().await
    }

    /// Scheduled entry point. Configuration problems fail before any load or write;
    /// every other error is returned to the caller unchanged.
    pub async fn run(&self) -> Result<ResetReport, ResetError> {
        let config = self.settings.validate()?;
        info!(
            "Starting scheduled reset of {} at path {}",
            config.reset_type, config.target
        );

        match self.execute(&config).await {
            Ok(report) => {
                info!("{}", report.message());
                Ok(report)
            }
            Err(e) => {
                error!("Error during scheduled reset: {}", e);
                Err(e)
            }
        }
    }

    /// Manual entry point. Rejections are typed errors; failures past
    /// validation come back as an unsuccessful outcome.
    pub async fn manual_run(&self, caller: &CallerIdentity) -> Result<ResetOutcome, CallableError> {
        if !caller.is_admin {
            warn!("Rejected manual reset from non-admin caller {}", caller.subject);
            return Err(CallableError::permission_denied(
                "Only admins can manually trigger resets",
            ));
        }

        if !self.settings.is_complete() {
            warn!("Rejected manual reset from {}: missing configuration", caller.subject);
            return Err(CallableError::failed_precondition(
                "Missing required configuration parameters",
            ));
        }

        let config = self
            .settings
            .validate()
            .map_err(|e| {
                warn!("Rejected manual reset from {}: {}", caller.subject, e);
                CallableError::invalid_argument(e.to_string())
            })?;

        info!(
            "Starting manual reset of {} at path {} for {}",
            config.reset_type, config.target, caller.subject
        );

        match self.execute(&config).await {
            Ok(report) => {
                info!("{}", report.message());
                Ok(ResetOutcome::success(report.message()))
            }
            Err(e) => {
                error!("Error during manual reset: {}", e);
                Ok(ResetOutcome::failure(format!("Reset operation failed: {}", e)))
            }
        }
    }

    async fn execute(&self, config: &ResetConfig) -> Result<ResetReport, ResetError> {
        let values = self.loader.load(&config.default_values).await?;

        let collection = match config.reset_type {
            ResetType::Document => {
                let fields = document_fields(&values)?;
                reset_document(self.store.as_ref(), &config.target, fields).await?;
                None
            }
            ResetType::Collection => {
                Some(reset_collection(self.store.as_ref(), &config.target, &values).await?)
            }
        };

        Ok(ResetReport {
            target: config.target.clone(),
            reset_type: config.reset_type,
            collection,
        })
    }
}

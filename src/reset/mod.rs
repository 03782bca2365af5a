pub mod collection;
pub mod document;
pub mod service;
pub mod values;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{ConfigError, ResetType};
use crate::database::{PathError, StoreError};

pub use collection::{reset_collection, CollectionResetSummary};
pub use document::{document_fields, reset_document};
pub use service::{ResetReport, ResetService};
pub use values::{DefaultValue, DefaultValuesLoader, LoadError, LoadErrorKind};

/// Everything that can stop a reset
#[derive(Debug, Error)]
pub enum ResetError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("Invalid reset target: {0}")]
    InvalidPath(#[from] PathError),

    #[error("Default values do not fit a {reset_type} reset: {reason}")]
    InvalidShape {
        reset_type: ResetType,
        reason: String,
    },

    #[error("Write failed: {0}")]
    Write(#[from] StoreError),
}

/// Result reported to a manual caller. Not persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetOutcome {
    pub success: bool,
    pub message: String,
}

impl ResetOutcome {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

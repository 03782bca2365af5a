use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Environment variable naming the document or collection path to reset
pub const RESET_TARGET_VAR: &str = "RESET_TARGET";
/// Environment variable holding `document` or `collection`
pub const RESET_TYPE_VAR: &str = "RESET_TYPE";
/// Environment variable holding inline JSON or a `gs://` reference
pub const DEFAULT_VALUES_VAR: &str = "DEFAULT_VALUES";

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_STORAGE_BASE_URL: &str = "https://storage.googleapis.com";

/// Configuration errors. Raised before any load or write is attempted.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    Missing(&'static str),

    #[error("RESET_TYPE must be either 'document' or 'collection', got '{0}'")]
    InvalidResetType(String),
}

/// How the reset target path is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResetType {
    Document,
    Collection,
}

impl ResetType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResetType::Document => "document",
            ResetType::Collection => "collection",
        }
    }
}

impl fmt::Display for ResetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResetType {
    type Err = ConfigError;

    // Exact match only, no trimming or case folding
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "document" => Ok(ResetType::Document),
            "collection" => Ok(ResetType::Collection),
            other => Err(ConfigError::InvalidResetType(other.to_string())),
        }
    }
}

/// Raw reset parameters as found in the environment. Empty values count as missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResetSettings {
    pub target: Option<String>,
    pub reset_type: Option<String>,
    pub default_values: Option<String>,
}

/// Validated reset parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResetConfig {
    pub target: String,
    pub reset_type: ResetType,
    pub default_values: String,
}

impl ResetSettings {
    pub fn new(
        target: impl Into<String>,
        reset_type: impl Into<String>,
        default_values: impl Into<String>,
    ) -> Self {
        Self {
            target: non_empty(Some(target.into())),
            reset_type: non_empty(Some(reset_type.into())),
            default_values: non_empty(Some(default_values.into())),
        }
    }

    pub fn from_env() -> Self {
        Self {
            target: non_empty(env::var(RESET_TARGET_VAR).ok()),
            reset_type: non_empty(env::var(RESET_TYPE_VAR).ok()),
            default_values: non_empty(env::var(DEFAULT_VALUES_VAR).ok()),
        }
    }

    /// True when all three parameters are present, regardless of validity
    pub fn is_complete(&self) -> bool {
        self.target.is_some() && self.reset_type.is_some() && self.default_values.is_some()
    }

    /// Checks target, then type, then source, failing on the first problem
    pub fn validate(&self) -> Result<ResetConfig, ConfigError> {
        let target = self
            .target
            .clone()
            .ok_or(ConfigError::Missing(RESET_TARGET_VAR))?;

        let reset_type = match self.reset_type.as_deref() {
            Some(raw) => raw.parse::<ResetType>()?,
            None => return Err(ConfigError::Missing(RESET_TYPE_VAR)),
        };

        let default_values = self
            .default_values
            .clone()
            .ok_or(ConfigError::Missing(DEFAULT_VALUES_VAR))?;

        Ok(ResetConfig {
            target,
            reset_type,
            default_values,
        })
    }
}

/// Process-level settings for the HTTP server and store backends
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub port: u16,
    pub database_url: Option<String>,
    pub max_connections: u32,
    pub jwt_secret: Option<String>,
    pub storage_base_url: String,
    pub storage_token: Option<String>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            database_url: None,
            max_connections: DEFAULT_MAX_CONNECTIONS,
            jwt_secret: None,
            storage_base_url: DEFAULT_STORAGE_BASE_URL.to_string(),
            storage_token: None,
        }
    }
}

impl ServiceConfig {
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        if let Some(port) = env::var("DOCRESET_PORT")
            .ok()
            .or_else(|| env::var("PORT").ok())
            .and_then(|s| s.parse::<u16>().ok())
        {
            self.port = port;
        }

        self.database_url = non_empty(env::var("DATABASE_URL").ok());
        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.max_connections = v.parse().unwrap_or(self.max_connections);
        }

        self.jwt_secret = non_empty(env::var("JWT_SECRET").ok());

        // Same variable the GCS client libraries honour for emulators
        if let Some(host) = non_empty(env::var("STORAGE_EMULATOR_HOST").ok()) {
            self.storage_base_url = host;
        }
        self.storage_token = non_empty(env::var("GCS_ACCESS_TOKEN").ok());

        self
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

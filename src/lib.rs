pub mod auth;
pub mod cli;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod reset;
pub mod storage;

pub use auth::CallerIdentity;
pub use config::{ResetSettings, ResetType};
pub use error::CallableError;
pub use reset::{DefaultValue, ResetError, ResetOutcome, ResetService};

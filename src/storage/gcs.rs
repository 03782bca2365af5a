use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::debug;
use url::Url;

use super::{ObjectRef, ObjectStore, StorageError};
use crate::config::ServiceConfig;

/// Downloads objects through the GCS JSON API media endpoint:
/// `GET {base}/storage/v1/b/{bucket}/o/{object}?alt=media`
#[derive(Clone)]
pub struct GcsObjectStore {
    client: reqwest::Client,
    base_url: Url,
    token: Option<String>,
}

impl GcsObjectStore {
    pub fn new(base_url: &str, token: Option<String>) -> Result<Self, StorageError> {
        // Emulator hosts are often given without a scheme
        let normalized = if base_url.contains("://") {
            base_url.to_string()
        } else {
            format!("http://{}", base_url)
        };
        let base_url =
            Url::parse(&normalized).map_err(|_| StorageError::InvalidUrl(base_url.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(StorageError::InvalidUrl(base_url.to_string()));
        }

        Ok(Self {
            client: reqwest::Client::new(),
            base_url,
            token,
        })
    }

    pub fn from_config(config: &ServiceConfig) -> Result<Self, StorageError> {
        Self::new(&config.storage_base_url, config.storage_token.clone())
    }

    /// Media download URL; the object name is encoded as a single path segment
    pub fn media_url(&self, object: &ObjectRef) -> Result<Url, StorageError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| StorageError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend([
                "storage",
                "v1",
                "b",
                object.bucket.as_str(),
                "o",
                object.object.as_str(),
            ]);
        url.query_pairs_mut().append_pair("alt", "media");
        Ok(url)
    }
}

#[async_trait]
impl ObjectStore for GcsObjectStore {
    async fn download(&self, object: &ObjectRef) -> Result<Vec<u8>, StorageError> {
        let url = self.media_url(object)?;
        debug!("Downloading {} from {}", object, url);

        let mut request = self.client.get(url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        match response.status() {
            status if status.is_success() => Ok(response.bytes().await?.to_vec()),
            StatusCode::NOT_FOUND => Err(StorageError::NotFound(object.to_string())),
            status => Err(StorageError::Status {
                status: status.as_u16(),
                object: object.to_string(),
            }),
        }
    }
}

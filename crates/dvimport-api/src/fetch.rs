//! Dataverse native API client.
use dvimport_core::{FetchError, MetadataFetcher};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde_json::Value;
use std::time::Duration;
use tracing::instrument;

/// Header carrying the Dataverse API token (`X-Dataverse-key`).
pub const API_KEY_HEADER: &str = "x-dataverse-key";

#[derive(Debug, Clone)]
pub struct DataverseClient {
    client: reqwest::Client,
}

impl DataverseClient {
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Transport(format!("client init failed: {e}")))?;
        Ok(Self { client })
    }

    /// `GET {base_url}/api/datasets/:persistentId/` for one dataset.
    pub fn dataset_url(base_url: &str) -> Result<reqwest::Url, FetchError> {
        let url = format!("{}/api/datasets/:persistentId/", base_url.trim_end_matches('/'));
        reqwest::Url::parse(&url).map_err(|e| FetchError::InvalidUrl(format!("{url}: {e}")))
    }

    fn auth_headers(api_token: &str) -> Result<HeaderMap, FetchError> {
        let mut headers = HeaderMap::new();
        let value = HeaderValue::from_str(api_token)
            .map_err(|e| FetchError::Transport(format!("invalid api token header: {e}")))?;
        headers.insert(HeaderName::from_static(API_KEY_HEADER), value);
        Ok(headers)
    }
}

impl MetadataFetcher for DataverseClient {
    #[instrument(name = "dataverse_fetch", skip(self, api_token))]
    async fn fetch(&self, base_url: &str, api_token: &str, identifier: &str) -> Result<Value, FetchError> {
        let url = Self::dataset_url(base_url)?;
        let resp = self
            .client
            .get(url.clone())
            .query(&[("persistentId", identifier)])
            .headers(Self::auth_headers(api_token)?)
            .send()
            .await
            .map_err(|e| FetchError::Transport(format!("{url}: {e}")))?;

        if !resp.status().is_success() {
            return Err(FetchError::Status {
                status: resp.status().as_u16(),
                url: url.to_string(),
            });
        }

        resp.json::<Value>()
            .await
            .map_err(|e| FetchError::Decode(format!("{url}: {e}")))
    }
}

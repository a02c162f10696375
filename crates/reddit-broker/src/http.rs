//! Bearer-authenticated JSON fetches against Reddit's OAuth API

use crate::config::HttpSettings;
use crate::error::FetchError;
use broker_common::ConfigurationError;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use serde_json::Value;
use tracing::debug;

/// Thin wrapper around a shared `reqwest::Client`
///
/// Cloning is cheap; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct RedditApiClient {
    http_client: reqwest::Client,
}

impl RedditApiClient {
    pub fn new(settings: &HttpSettings) -> Result<Self, ConfigurationError> {
        let http_client = reqwest::Client::builder()
            .timeout(settings.timeout())
            .user_agent(settings.user_agent.clone())
            .build()
            .map_err(|e| ConfigurationError::InvalidValue {
                key: "http".to_string(),
                reason: format!("Failed to build HTTP client: {e}"),
            })?;

        Ok(Self { http_client })
    }

    /// GET `url` with `Authorization: Bearer <access_token>` and decode the body as JSON
    ///
    /// Non-2xx statuses are errors; the response body is kept for diagnostics.
    pub async fn get_json(&self, url: &str, access_token: &str) -> Result<Value, FetchError> {
        debug!(url, "Fetching JSON document");

        let response = self
            .http_client
            .get(url)
            .header(AUTHORIZATION, format!("Bearer {access_token}"))
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!(url, %status, "Endpoint returned non-success status");
            return Err(FetchError::UnexpectedStatus { status, body });
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

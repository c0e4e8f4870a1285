//! Practicum homework status endpoint.
//!
//! One `GET` per [`StatusSource::fetch`] call, authenticated with
//! `Authorization: OAuth <token>` and filtered by `from_date`.

use async_trait::async_trait;
use hwatch_core::{
    config::{PracticumConfig, WatchConfig},
    error::WatchError,
    traits::StatusSource,
};
use reqwest::{header::AUTHORIZATION, StatusCode};
use std::time::Duration;
use tracing::debug;

/// Status source backed by the Practicum HTTP API.
pub struct PracticumClient {
    client: reqwest::Client,
    endpoint: String,
    token: String,
}

impl PracticumClient {
    /// Create a client. `timeout` bounds the whole request.
    pub fn new(
        endpoint: impl Into<String>,
        token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, WatchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| WatchError::Transport(format!("failed to build http client: {e}")))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            token: token.into(),
        })
    }

    pub fn from_config(
        watch: &WatchConfig,
        practicum: &PracticumConfig,
    ) -> Result<Self, WatchError> {
        Self::new(
            watch.endpoint.clone(),
            practicum.token.clone(),
            Duration::from_secs(watch.request_timeout_secs),
        )
    }
}

#[async_trait]
impl StatusSource for PracticumClient {
    fn name(&self) -> &str {
        "practicum"
    }

    async fn fetch(&self, since: i64) -> Result<serde_json::Value, WatchError> {
        debug!("requesting homework statuses from_date={since}");

        let resp = self
            .client
            .get(&self.endpoint)
            .header(AUTHORIZATION, format!("OAuth {}", self.token))
            .query(&[("from_date", since)])
            .send()
            .await
            .map_err(|e| {
                WatchError::Transport(format!("request to {} failed: {e}", self.endpoint))
            })?;

        let status = resp.status();
        if status != StatusCode::OK {
            return Err(WatchError::HttpStatus(status.as_u16()));
        }

        let body = resp
            .text()
            .await
            .map_err(|e| WatchError::Transport(format!("failed to read response body: {e}")))?;

        serde_json::from_str(&body).map_err(|e| WatchError::Decode(e.to_string()))
    }
}

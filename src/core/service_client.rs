// src/core/service_client.rs
//! JSON HTTP client for the InternStud REST API

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{debug, trace};

const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Error body returned by the API, only the fields worth surfacing
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
    #[serde(default)]
    error_code: Option<String>,
}

pub struct ServiceClient {
    client: reqwest::Client,
    base_url: String,
}

impl ServiceClient {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT_SECS)
    }

    pub fn with_timeout(base_url: &str, timeout_seconds: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_seconds))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Generic POST request with JSON
    pub async fn post_json<T, R>(&self, endpoint: &str, payload: &T) -> Result<R>
    where
        T: serde::Serialize,
        R: serde::de::DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, endpoint);
        trace!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .json(payload)
            .send()
            .await
            .with_context(|| format!("Failed to POST to {}", url))?;

        Self::read_json(response).await
    }

    /// Generic GET request
    pub async fn get<R>(&self, endpoint: &str) -> Result<R>
    where
        R: serde::de::DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, endpoint);
        trace!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to GET from {}", url))?;

        Self::read_json(response).await
    }

    async fn read_json<R>(response: reqwest::Response) -> Result<R>
    where
        R: serde::de::DeserializeOwned,
    {
        let status = response.status();
        if status.is_success() {
            return response
                .json::<R>()
                .await
                .context("Failed to parse JSON response");
        }

        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        debug!("Service error response ({}): {}", status, error_text);

        match serde_json::from_str::<ErrorBody>(&error_text) {
            Ok(ErrorBody {
                error,
                error_code: Some(code),
            }) => anyhow::bail!("HTTP {} error [{}]: {}", status, code, error),
            Ok(ErrorBody { error, .. }) => anyhow::bail!("HTTP {} error: {}", status, error),
            Err(_) => anyhow::bail!("HTTP {} error: {}", status, error_text),
        }
    }
}

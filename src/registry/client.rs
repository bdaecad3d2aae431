//! HTTP implementation of the registry client.
//!
//! Talks to the registry's REST surface:
//! - `PUT  {base}/api-definitions/{id}/analysis-state` for state updates
//! - `GET  {base}/api-definitions/{id}/specification` for raw spec content

use crate::models::{StateUpdateRequest, StateUpdateResponse};
use crate::registry::{RegistryClient, RegistryError};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// Configuration for [`HttpRegistryClient`].
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// Base URL of the registry service, without a trailing slash.
    pub base_url: String,
    /// Registry identifier of the API definition being analyzed.
    pub definition_id: String,
    /// Optional bearer token attached to every request.
    pub api_token: Option<String>,
    /// Per-request timeout.
    pub timeout_seconds: u64,
}

/// Registry client over HTTP using a shared connection pool.
pub struct HttpRegistryClient {
    config: RegistryConfig,
    http_client: reqwest::Client,
}

impl HttpRegistryClient {
    pub fn new(config: RegistryConfig) -> Result<Self, RegistryError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(RegistryError::Transport)?;

        Ok(Self {
            config,
            http_client,
        })
    }

    fn state_url(&self) -> String {
        format!(
            "{}/api-definitions/{}/analysis-state",
            self.config.base_url.trim_end_matches('/'),
            self.config.definition_id
        )
    }

    fn specification_url(&self) -> String {
        format!(
            "{}/api-definitions/{}/specification",
            self.config.base_url.trim_end_matches('/'),
            self.config.definition_id
        )
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.config.api_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    fn map_send_error(&self, e: reqwest::Error) -> RegistryError {
        if e.is_timeout() {
            RegistryError::Timeout {
                seconds: self.config.timeout_seconds,
            }
        } else if e.is_connect() {
            RegistryError::Connect {
                url: self.config.base_url.clone(),
            }
        } else {
            RegistryError::Transport(e)
        }
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, RegistryError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            Err(RegistryError::Rejected { status, body })
        }
    }
}

#[async_trait]
impl RegistryClient for HttpRegistryClient {
    async fn update_analysis_state(
        &self,
        request: &StateUpdateRequest,
    ) -> Result<StateUpdateResponse, RegistryError> {
        let url = self.state_url();
        debug!("PUT {} (state: {})", url, request.state);

        let response = self
            .authorize(self.http_client.put(&url))
            .json(request)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let response = Self::check_status(response).await?;
        response.json().await.map_err(RegistryError::Decode)
    }

    async fn get_specification_content(&self) -> Result<String, RegistryError> {
        let url = self.specification_url();
        debug!("GET {}", url);

        let response = self
            .authorize(self.http_client.get(&url))
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let response = Self::check_status(response).await?;
        response.text().await.map_err(RegistryError::Decode)
    }
}

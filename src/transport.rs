//! HTTP collaborator
//!
//! Everything above this module sees the API through [`Transport::fetch`]: one
//! GET for an endpoint plus query parameters, returning the decoded JSON body.
//! No retries, no caching.

use crate::{
    auth::{self, Credentials},
    config::ClientConfig,
    error::{LandfilesError, Result},
};
use async_trait::async_trait;
use serde_json::Value;

/// Query string pairs appended to an endpoint
pub type QueryParams = [(String, String)];

#[async_trait]
pub trait Transport: Send + Sync {
    /// GET `endpoint` and decode its JSON body
    ///
    /// # Returns
    /// * `Ok(Value)` - Decoded response body
    /// * `Err(Transport | Status | Api)` - Network failure, non-2xx status, or an `error` body
    async fn fetch(&self, endpoint: &str, query: &QueryParams) -> Result<Value>;
}

/// reqwest-backed transport authenticated with a bearer token
pub struct HttpTransport {
    client: reqwest::Client,
    config: ClientConfig,
    token: String,
}

impl HttpTransport {
    /// Build the HTTP client and run the password grant
    pub async fn connect(config: ClientConfig, credentials: &Credentials) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        let token = auth::request_token(&client, &config, credentials).await?;

        Ok(Self {
            client,
            config,
            token,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn fetch(&self, endpoint: &str, query: &QueryParams) -> Result<Value> {
        let url = self.config.build_url(endpoint);
        log::debug!("GET {} {:?}", url, query);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .query(query)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LandfilesError::Status {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        let body: Value = response.json().await?;
        check_api_error(endpoint, body)
    }
}

/// Reject bodies the API flags with an `error` key
pub fn check_api_error(endpoint: &str, body: Value) -> Result<Value> {
    let is_error = body
        .as_object()
        .map_or(false, |obj| obj.contains_key("error"));

    if is_error {
        log::warn!("API error from {}: {}", endpoint, body);
        return Err(LandfilesError::Api {
            endpoint: endpoint.to_string(),
            body,
        });
    }
    Ok(body)
}

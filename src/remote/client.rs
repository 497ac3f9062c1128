//! HTTPS GraphQL client
//!
//! Posts `{"query", "variables"}` bodies to a single endpoint with bearer auth.
//! The client does not retry; pacing and error isolation live in the exporter.

use std::time::{Duration, Instant};

use reqwest::StatusCode;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{debug, warn};

use super::{GraphQlTransport, RemoteError};

/// Connection settings for [`HttpGraphQlClient`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// GraphQL endpoint URL (e.g., "https://shop.example.com/graphql/")
    pub endpoint: String,
    /// Bearer token sent in the `Authorization` header
    #[serde(default, skip_serializing)]
    pub token: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            token: None,
            timeout_secs: 60,
        }
    }
}

impl ClientConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Default::default()
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_secs = seconds;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.endpoint.trim().is_empty() {
            return Err("GraphQL endpoint is required".to_string());
        }
        if !(self.endpoint.starts_with("https://") || self.endpoint.starts_with("http://")) {
            return Err(format!(
                "GraphQL endpoint must be an http(s) URL: {}",
                self.endpoint
            ));
        }
        if self.timeout_secs == 0 {
            return Err("Timeout must be greater than zero".to_string());
        }
        Ok(())
    }
}

/// Blocking GraphQL client for the remote commerce platform
pub struct HttpGraphQlClient {
    config: ClientConfig,
    client: reqwest::blocking::Client,
}

impl HttpGraphQlClient {
    /// Create a new client
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use catalog_export::remote::{ClientConfig, HttpGraphQlClient};
    ///
    /// let client = HttpGraphQlClient::new(
    ///     ClientConfig::new("https://shop.example.com/graphql/").with_token("secret"),
    /// )?;
    /// # Ok::<(), catalog_export::remote::RemoteError>(())
    /// ```
    pub fn new(config: ClientConfig) -> Result<Self, RemoteError> {
        config.validate().map_err(RemoteError::Transport)?;

        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| RemoteError::Transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }

    fn describe(error: &reqwest::Error) -> String {
        if error.is_timeout() {
            format!("Request timeout: {}", error)
        } else if error.is_connect() {
            format!("Connection error: {}", error)
        } else {
            format!("Network error: {}", error)
        }
    }
}

impl GraphQlTransport for HttpGraphQlClient {
    fn execute(&self, query: &str, variables: Value) -> Result<Value, RemoteError> {
        let payload = json!({
            "query": query.trim(),
            "variables": variables,
        });

        let mut request = self
            .client
            .post(&self.config.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .json(&payload);

        if let Some(ref token) = self.config.token {
            request = request.bearer_auth(token);
        }

        let started = Instant::now();
        let response = request.send().map_err(|e| {
            let message = Self::describe(&e);
            warn!(endpoint = %self.config.endpoint, error = %message, "GraphQL request failed");
            RemoteError::Transport(message)
        })?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| RemoteError::Transport(format!("Failed to read response body: {}", e)))?;

        debug!(
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            bytes = body.len(),
            "GraphQL response received"
        );

        if status != StatusCode::OK {
            return Err(RemoteError::Http {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| RemoteError::ResponseParse(e.to_string()))
    }
}

use std::time::Duration;

use reqwest::{header, Client as ReqwestClient, Response};
use tracing::{debug, info, instrument, warn};

use super::errors::ClaudeApiError;
use super::types::{MessageRequest, MessageResponse};
use crate::domain::models::AnthropicConfig;

const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Placeholder logged in place of the API key.
const REDACTED_KEY: &str = "[REDACTED]";

/// Configuration for the Claude HTTP client
#[derive(Debug, Clone)]
pub struct ClaudeClientConfig {
    /// Anthropic API key
    pub api_key: String,
    /// API base URL, without the `/v1/messages` path
    pub base_url: String,
    /// Per-request timeout
    pub timeout_secs: u64,
}

impl ClaudeClientConfig {
    /// Build from loaded configuration.
    ///
    /// # Errors
    /// Returns `ClaudeApiError::MissingApiKey` if no key is configured.
    pub fn from_anthropic(config: &AnthropicConfig) -> Result<Self, ClaudeApiError> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or(ClaudeApiError::MissingApiKey)?;

        Ok(Self {
            api_key,
            base_url: config.base_url.clone(),
            timeout_secs: config.timeout_secs,
        })
    }
}

/// HTTP client for the Claude Messages API.
///
/// Each call is a single attempt. Retries belong to the caller's retry controller.
#[derive(Debug, Clone)]
pub struct ClaudeClient {
    http_client: ReqwestClient,
    base_url: String,
}

impl ClaudeClient {
    /// Create a new Claude API client
    ///
    /// # Example
    /// ```no_run
    /// use dead_air::infrastructure::claude::{ClaudeClient, ClaudeClientConfig};
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = ClaudeClient::new(ClaudeClientConfig {
    ///     api_key: "sk-ant-...".to_string(),
    ///     base_url: "https://api.anthropic.com".to_string(),
    ///     timeout_secs: 120,
    /// })?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(config: ClaudeClientConfig) -> Result<Self, ClaudeApiError> {
        info!(
            "Initializing Claude API client: base_url={}, timeout={}s, api_key={}",
            config.base_url, config.timeout_secs, REDACTED_KEY
        );

        let mut headers = header::HeaderMap::new();
        headers.insert(
            "x-api-key",
            header::HeaderValue::from_str(&config.api_key)
                .map_err(|e| ClaudeApiError::InvalidRequest(format!("Invalid API key: {e}")))?,
        );
        headers.insert(
            "anthropic-version",
            header::HeaderValue::from_static(ANTHROPIC_VERSION),
        );
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let http_client = ReqwestClient::builder()
            .pool_max_idle_per_host(10)
            .timeout(Duration::from_secs(config.timeout_secs))
            .tcp_nodelay(true)
            .default_headers(headers)
            .build()
            .map_err(ClaudeApiError::NetworkError)?;

        Ok(Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Send a message to Claude and get a response
    #[instrument(skip(self, request), fields(model = %request.model, max_tokens = request.max_tokens))]
    pub async fn send_message(
        &self,
        request: &MessageRequest,
    ) -> Result<MessageResponse, ClaudeApiError> {
        let url = format!("{}/v1/messages", self.base_url);
        debug!("POST {}", url);

        let response = self.http_client.post(&url).json(request).send().await?;
        let message = Self::handle_response(response).await?;

        debug!(
            "Message request succeeded: input_tokens={}, output_tokens={}",
            message.usage.input_tokens, message.usage.output_tokens
        );
        Ok(message)
    }

    /// Handle HTTP response and convert to typed result
    async fn handle_response(response: Response) -> Result<MessageResponse, ClaudeApiError> {
        let status = response.status();
        debug!("Response status: {}", status);

        let body = response.text().await?;
        if !status.is_success() {
            warn!("API error ({}): {}", status, body);
            return Err(ClaudeApiError::from_status(status, body));
        }

        Ok(serde_json::from_str(&body)?)
    }
}

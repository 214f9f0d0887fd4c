//! Claude API client for short text generation.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use tracing::instrument;

use crate::config::ClaudeConfig;
use crate::providers::{GenerationError, TextGenerator};

use super::error::ClaudeError;
use super::types::{ChatRequest, ChatResponse};

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Claude API client.
///
/// Sends single-turn, text-only requests to the Anthropic Messages API.
#[derive(Clone)]
pub struct ClaudeClient {
    inner: Arc<ClaudeClientInner>,
}

struct ClaudeClientInner {
    client: reqwest::Client,
    endpoint: String,
    model: String,
}

impl ClaudeClient {
    /// Create a new Claude client.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key contains invalid header characters or
    /// the HTTP client cannot be built.
    pub fn new(config: &ClaudeConfig) -> Result<Self, ClaudeError> {
        Self::with_endpoint(config, ANTHROPIC_API_URL)
    }

    /// Create a client that sends requests to `endpoint`.
    ///
    /// # Errors
    ///
    /// Same as [`Self::new`].
    pub fn with_endpoint(config: &ClaudeConfig, endpoint: &str) -> Result<Self, ClaudeError> {
        let mut api_key = HeaderValue::from_str(config.api_key.expose_secret())
            .map_err(|_| ClaudeError::InvalidApiKey)?;
        api_key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert("x-api-key", api_key);
        headers.insert(
            "anthropic-version",
            HeaderValue::from_static(ANTHROPIC_VERSION),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            inner: Arc::new(ClaudeClientInner {
                client,
                endpoint: endpoint.to_string(),
                model: config.model.clone(),
            }),
        })
    }

    /// Send one user message and return the reply's text.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, Claude answers with a
    /// non-success status, or the body is not a Messages API reply.
    #[instrument(skip(self, prompt), fields(model = %self.inner.model))]
    pub async fn complete(&self, prompt: &str, max_tokens: u32) -> Result<String, ClaudeError> {
        let request = ChatRequest::single(&self.inner.model, prompt, max_tokens);

        let response = self
            .inner
            .client
            .post(&self.inner.endpoint)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(ClaudeError::from_status(status, &body));
        }

        let reply: ChatResponse = serde_json::from_str(&body)?;
        Ok(reply.text())
    }
}

#[async_trait]
impl TextGenerator for ClaudeClient {
    async fn generate(
        &self,
        prompt: &str,
        max_output_tokens: u32,
    ) -> Result<String, GenerationError> {
        let text = self.complete(prompt, max_output_tokens).await?;
        if text.trim().is_empty() {
            return Err(GenerationError::Empty);
        }
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use secrecy::SecretString;

    use super::*;

    #[test]
    fn test_rejects_invalid_api_key() {
        let config = ClaudeConfig {
            api_key: SecretString::from("bad\nkey"),
            model: "claude-3-5-haiku-latest".to_string(),
            timeout: Duration::from_secs(5),
        };
        assert!(matches!(
            ClaudeClient::new(&config),
            Err(ClaudeError::InvalidApiKey)
        ));
    }

    #[test]
    fn test_claude_client_is_clone() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<ClaudeClient>();
    }

    #[test]
    fn test_claude_client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ClaudeClient>();
    }
}

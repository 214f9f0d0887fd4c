//! Search API transport.

use async_trait::async_trait;
use domain_search_core::{AvailabilityResult, ErrorResponse, SearchRequest, SearchResponse};
use thiserror::Error;
use tracing::instrument;
use url::Url;

use crate::config::ClientConfig;

/// Errors from a search request.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed (connect, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("{message} (HTTP {status})")]
    Status {
        /// HTTP status code.
        status: u16,
        /// The server's `error` message, or the status reason.
        message: String,
    },

    /// The response body was not a search response.
    #[error("invalid response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The client could not be configured.
    #[error("invalid client configuration: {0}")]
    Config(String),
}

/// Something that can run a search.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Search for `query`, scoped to `team_id` when given.
    async fn search(
        &self,
        query: &str,
        team_id: Option<&str>,
    ) -> Result<Vec<AvailabilityResult>, ClientError>;
}

/// [`SearchBackend`] over `POST /api/search`.
#[derive(Clone)]
pub struct HttpSearchBackend {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpSearchBackend {
    /// Create a backend for the configured API.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint URL is invalid or the HTTP client
    /// cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let endpoint = config
            .search_endpoint()
            .map_err(|e| ClientError::Config(format!("invalid API URL: {e}")))?;

        let client = reqwest::Client::builder().timeout(config.timeout).build()?;

        Ok(Self { client, endpoint })
    }

    /// The URL searches are posted to.
    #[must_use]
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl SearchBackend for HttpSearchBackend {
    #[instrument(skip(self), fields(endpoint = %self.endpoint))]
    async fn search(
        &self,
        query: &str,
        team_id: Option<&str>,
    ) -> Result<Vec<AvailabilityResult>, ClientError> {
        let request = SearchRequest::new(query, team_id.map(String::from));

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorResponse>(&body).map_or_else(
                |_| {
                    status
                        .canonical_reason()
                        .unwrap_or("Search failed")
                        .to_string()
                },
                |e| e.error,
            );
            tracing::warn!(status = status.as_u16(), %message, "Search request failed");
            return Err(ClientError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: SearchResponse = serde_json::from_slice(&body)?;
        Ok(parsed.domains)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_from_config() {
        let backend = HttpSearchBackend::new(&ClientConfig::default()).unwrap();
        assert_eq!(
            backend.endpoint().as_str(),
            "http://127.0.0.1:3000/api/search"
        );
    }

    #[test]
    fn test_invalid_api_url() {
        let config = ClientConfig {
            api_url: "not a url".to_string(),
            ..ClientConfig::default()
        };
        assert!(matches!(
            HttpSearchBackend::new(&config),
            Err(ClientError::Config(_))
        ));
    }

    #[test]
    fn test_status_error_display() {
        let err = ClientError::Status {
            status: 502,
            message: "Failed to check domain availability".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Failed to check domain availability (HTTP 502)"
        );
    }

    #[test]
    fn test_backend_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + Clone>() {}
        assert_send_sync::<HttpSearchBackend>();
    }
}

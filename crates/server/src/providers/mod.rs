//! Upstream collaborators: the registrar and the text generator.
//!
//! Both are reached through narrow traits so the search pipeline can run
//! against in-memory fakes in tests.
//!
//! - [`AvailabilityProvider`] - supported TLDs and bulk availability
//!   ([`RegistrarClient`] talks to a Vercel-style registrar API)
//! - [`TextGenerator`] - short free-text generation
//!   ([`crate::claude::ClaudeClient`] or [`DisabledGenerator`])

pub mod registrar;

use async_trait::async_trait;
use domain_search_core::AvailabilityResult;
use thiserror::Error;

use crate::claude::ClaudeError;

pub use registrar::RegistrarClient;

/// Errors from the availability provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// HTTP request failed (connect, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered with a non-success status.
    #[error("provider returned HTTP {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Truncated response body.
        body: String,
    },

    /// Rate limited by the provider.
    #[error("rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// The payload did not have a recognizable shape.
    #[error("malformed provider response: {0}")]
    Malformed(String),

    /// The client could not be configured.
    #[error("invalid provider configuration: {0}")]
    Config(String),
}

/// Errors from the text generator.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// Claude API call failed.
    #[error("Claude error: {0}")]
    Claude(#[from] ClaudeError),

    /// No generator is configured.
    #[error("text generation is not configured")]
    NotConfigured,

    /// The generator returned no text.
    #[error("text generation returned no text")]
    Empty,
}

/// Registrar operations needed by a search.
#[async_trait]
pub trait AvailabilityProvider: Send + Sync {
    /// List the TLDs the registrar can sell.
    async fn supported_tlds(&self, team_id: Option<&str>) -> Result<Vec<String>, ProviderError>;

    /// Check availability of every domain in one request.
    ///
    /// Entries are returned in provider order, in whatever shape the
    /// provider chose.
    async fn bulk_availability(
        &self,
        team_id: Option<&str>,
        domains: &[String],
    ) -> Result<Vec<AvailabilityResult>, ProviderError>;
}

/// Free-text generation.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate text for `prompt`, bounded to `max_output_tokens`.
    async fn generate(
        &self,
        prompt: &str,
        max_output_tokens: u32,
    ) -> Result<String, GenerationError>;
}

/// Generator used when no API key is configured.
///
/// Always fails, so multi-word queries fall back to the compacted query.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledGenerator;

#[async_trait]
impl TextGenerator for DisabledGenerator {
    async fn generate(
        &self,
        _prompt: &str,
        _max_output_tokens: u32,
    ) -> Result<String, GenerationError> {
        Err(GenerationError::NotConfigured)
    }
}

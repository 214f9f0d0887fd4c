//! Application state shared across handlers.

use std::sync::Arc;

use thiserror::Error;

use crate::claude::{ClaudeClient, ClaudeError};
use crate::config::ServerConfig;
use crate::providers::{
    AvailabilityProvider, DisabledGenerator, ProviderError, RegistrarClient, TextGenerator,
};
use crate::services::SearchService;

/// Error building the provider clients.
#[derive(Debug, Error)]
pub enum StateError {
    #[error("registrar client: {0}")]
    Registrar(#[from] ProviderError),
    #[error("Claude client: {0}")]
    Claude(#[from] ClaudeError),
}

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    search: SearchService,
}

impl AppState {
    /// Build the state with real provider clients.
    ///
    /// Without a Claude configuration, label generation is disabled and
    /// multi-word queries use the compacted query as their label.
    ///
    /// # Errors
    ///
    /// Returns an error if a provider client cannot be constructed.
    pub fn new(config: &ServerConfig) -> Result<Self, StateError> {
        let provider: Arc<dyn AvailabilityProvider> =
            Arc::new(RegistrarClient::new(&config.registrar)?);

        let generator: Arc<dyn TextGenerator> = match &config.claude {
            Some(claude) => {
                tracing::info!(model = %claude.model, "AI label generation enabled");
                Arc::new(ClaudeClient::new(claude)?)
            }
            None => {
                tracing::info!("ANTHROPIC_API_KEY not set, AI label generation disabled");
                Arc::new(DisabledGenerator)
            }
        };

        Ok(Self::from_parts(config, provider, generator))
    }

    /// Build the state around existing providers.
    #[must_use]
    pub fn from_parts(
        config: &ServerConfig,
        provider: Arc<dyn AvailabilityProvider>,
        generator: Arc<dyn TextGenerator>,
    ) -> Self {
        let search = SearchService::new(provider, generator, config.search);
        Self {
            inner: Arc::new(AppStateInner { search }),
        }
    }

    /// Get a reference to the search service.
    #[must_use]
    pub fn search(&self) -> &SearchService {
        &self.inner.search
    }
}

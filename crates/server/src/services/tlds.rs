//! Supported TLD catalog.

use std::sync::Arc;
use std::time::Duration;

use domain_search_core::{TimedMemo, pick_candidate_tlds};
use tracing::instrument;

use crate::providers::{AvailabilityProvider, ProviderError};

/// Process-wide snapshot of the TLDs the registrar supports.
///
/// The snapshot is fetched lazily and reused until its TTL elapses. Callers
/// that arrive while a fetch is running wait for it instead of issuing their
/// own; a failed fetch is not remembered, so the next caller retries.
#[derive(Clone)]
pub struct TldCatalog {
    provider: Arc<dyn AvailabilityProvider>,
    cache: TimedMemo<(), Arc<Vec<String>>>,
}

impl TldCatalog {
    #[must_use]
    pub fn new(provider: Arc<dyn AvailabilityProvider>, ttl: Duration) -> Self {
        Self {
            provider,
            cache: TimedMemo::with_capacity(ttl, 1),
        }
    }

    /// The supported TLDs, normalized and in provider order.
    ///
    /// `team_id` is forwarded on the fetch that populates the snapshot; the
    /// snapshot itself is shared by every team.
    ///
    /// # Errors
    ///
    /// Returns the provider error of the fetch this call waited on.
    #[instrument(skip(self))]
    pub async fn supported(
        &self,
        team_id: Option<&str>,
    ) -> Result<Arc<Vec<String>>, Arc<ProviderError>> {
        let provider = Arc::clone(&self.provider);
        self.cache
            .try_get_or_insert_with((), async move {
                let tlds = provider.supported_tlds(team_id).await?;
                tracing::info!(count = tlds.len(), "Refreshed supported TLDs");
                Ok::<_, ProviderError>(Arc::new(tlds))
            })
            .await
    }

    /// At most `limit` candidate TLDs, priority TLDs first.
    ///
    /// # Errors
    ///
    /// Same as [`Self::supported`].
    pub async fn candidates(
        &self,
        team_id: Option<&str>,
        limit: usize,
    ) -> Result<Vec<String>, Arc<ProviderError>> {
        let supported = self.supported(team_id).await?;
        Ok(pick_candidate_tlds(&supported, limit))
    }
}

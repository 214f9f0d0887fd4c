//! Candidate domain construction and bulk availability.

use std::sync::Arc;

use domain_search_core::{AvailabilityResult, Query, SearchMode};
use tracing::instrument;

use crate::providers::{AvailabilityProvider, ProviderError};

/// Build the domains to check for a query.
///
/// A query that already names a domain yields exactly that domain, whatever
/// `tlds` holds. Otherwise `label` is paired with every TLD in order. An
/// empty label yields nothing.
#[must_use]
pub fn candidate_domains(query: &Query, label: &str, tlds: &[String]) -> Vec<String> {
    match query.mode() {
        SearchMode::FullDomain => vec![query.normalized().to_owned()],
        SearchMode::FanOut if label.is_empty() => Vec::new(),
        SearchMode::FanOut => tlds.iter().map(|tld| format!("{label}.{tld}")).collect(),
    }
}

/// Checks a batch of candidate domains in one provider call.
#[derive(Clone)]
pub struct AvailabilityResolver {
    provider: Arc<dyn AvailabilityProvider>,
}

impl AvailabilityResolver {
    #[must_use]
    pub fn new(provider: Arc<dyn AvailabilityProvider>) -> Self {
        Self { provider }
    }

    /// Check every domain with a single bulk request.
    ///
    /// Results come back exactly as the provider returned them. An empty
    /// batch returns an empty list without contacting the provider.
    ///
    /// # Errors
    ///
    /// Returns the provider error unchanged.
    #[instrument(skip(self, domains), fields(count = domains.len()))]
    pub async fn resolve(
        &self,
        team_id: Option<&str>,
        domains: &[String],
    ) -> Result<Vec<AvailabilityResult>, ProviderError> {
        if domains.is_empty() {
            return Ok(Vec::new());
        }

        self.provider
            .bulk_availability(team_id, domains)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Bulk availability check failed"))
    }
}

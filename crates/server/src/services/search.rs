//! The search pipeline behind `POST /api/search`.

use std::sync::Arc;

use domain_search_core::{AvailabilityResult, Query, SearchMode};
use tracing::instrument;

use crate::config::SearchConfig;
use crate::providers::{AvailabilityProvider, TextGenerator};

use super::SearchError;
use super::labels::LabelSynthesizer;
use super::resolver::{AvailabilityResolver, candidate_domains};
use super::tlds::TldCatalog;

/// Turns a raw query into availability results.
///
/// Cheap to clone; caches are shared between clones.
#[derive(Clone)]
pub struct SearchService {
    inner: Arc<SearchServiceInner>,
}

struct SearchServiceInner {
    config: SearchConfig,
    labels: LabelSynthesizer,
    tlds: TldCatalog,
    resolver: AvailabilityResolver,
}

impl SearchService {
    #[must_use]
    pub fn new(
        provider: Arc<dyn AvailabilityProvider>,
        generator: Arc<dyn TextGenerator>,
        config: SearchConfig,
    ) -> Self {
        Self {
            inner: Arc::new(SearchServiceInner {
                labels: LabelSynthesizer::new(generator, config.label_ttl),
                tlds: TldCatalog::new(Arc::clone(&provider), config.tld_ttl),
                resolver: AvailabilityResolver::new(provider),
                config,
            }),
        }
    }

    /// Run a search.
    ///
    /// Blank input returns no results without touching any provider. A query
    /// naming a full domain is checked alone. Anything else has its label
    /// derived while candidate TLDs are fetched, then every `label.tld` is
    /// checked in one bulk request.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLD list or the availability check fails.
    #[instrument(
        skip(self),
        fields(
            mode = tracing::field::Empty,
            label = tracing::field::Empty,
            candidates = tracing::field::Empty
        )
    )]
    pub async fn search(
        &self,
        raw: &str,
        team_id: Option<&str>,
    ) -> Result<Vec<AvailabilityResult>, SearchError> {
        let Some(query) = Query::parse(raw) else {
            return Ok(Vec::new());
        };

        let span = tracing::Span::current();
        span.record("mode", tracing::field::debug(query.mode()));

        let domains = match query.mode() {
            SearchMode::FullDomain => candidate_domains(&query, "", &[]),
            SearchMode::FanOut => {
                let limit = if query.is_multi_word() {
                    self.inner.config.ai_tld_limit
                } else {
                    self.inner.config.tld_limit
                };

                let (label, tlds) = tokio::join!(
                    self.inner.labels.derive(raw, &query),
                    self.inner.tlds.candidates(team_id, limit)
                );
                let tlds = tlds.map_err(SearchError::Tlds)?;

                span.record("label", label.as_str());
                candidate_domains(&query, &label, &tlds)
            }
        };

        span.record("candidates", domains.len());
        Ok(self.inner.resolver.resolve(team_id, &domains).await?)
    }
}

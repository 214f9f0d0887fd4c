//! In-memory provider fakes with call counters.

#![allow(clippy::unwrap_used)]

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use domain_search_core::AvailabilityResult;

use crate::providers::{
    AvailabilityProvider, GenerationError, ProviderError, TextGenerator,
};

/// Text generator returning a fixed reply, or always failing.
pub struct FakeGenerator {
    reply: Option<String>,
    delay: Option<Duration>,
    calls: AtomicUsize,
    last_prompt: Mutex<Option<String>>,
}

impl FakeGenerator {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            delay: None,
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
        }
    }

    pub fn failing() -> Self {
        Self {
            reply: None,
            delay: None,
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
        }
    }

    pub fn with_delay_ms(mut self, ms: u64) -> Self {
        self.delay = Some(Duration::from_millis(ms));
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for FakeGenerator {
    async fn generate(
        &self,
        prompt: &str,
        _max_output_tokens: u32,
    ) -> Result<String, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_prompt.lock().unwrap() = Some(prompt.to_string());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        self.reply.clone().ok_or(GenerationError::NotConfigured)
    }
}

/// Availability provider backed by a fixed TLD list.
///
/// Bulk checks answer every domain as available unless canned results are
/// set.
pub struct FakeProvider {
    tlds: Vec<String>,
    results: Option<Vec<AvailabilityResult>>,
    fail_tlds: bool,
    fail_availability: bool,
    delay: Option<Duration>,
    tld_calls: AtomicUsize,
    availability_calls: AtomicUsize,
    requests: Mutex<Vec<(Option<String>, Vec<String>)>>,
}

impl FakeProvider {
    pub fn with_tlds(tlds: &[&str]) -> Self {
        Self {
            tlds: tlds.iter().map(ToString::to_string).collect(),
            results: None,
            fail_tlds: false,
            fail_availability: false,
            delay: None,
            tld_calls: AtomicUsize::new(0),
            availability_calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn with_results(mut self, results: Vec<AvailabilityResult>) -> Self {
        self.results = Some(results);
        self
    }

    pub fn failing_tlds(mut self) -> Self {
        self.fail_tlds = true;
        self
    }

    pub fn failing_availability(mut self) -> Self {
        self.fail_availability = true;
        self
    }

    pub fn with_delay_ms(mut self, ms: u64) -> Self {
        self.delay = Some(Duration::from_millis(ms));
        self
    }

    pub fn tld_calls(&self) -> usize {
        self.tld_calls.load(Ordering::SeqCst)
    }

    pub fn availability_calls(&self) -> usize {
        self.availability_calls.load(Ordering::SeqCst)
    }

    /// Domains sent with the most recent bulk check.
    pub fn last_domains(&self) -> Option<Vec<String>> {
        self.requests
            .lock()
            .unwrap()
            .last()
            .map(|(_, domains)| domains.clone())
    }

    /// Team sent with the most recent bulk check.
    pub fn last_team(&self) -> Option<String> {
        self.requests
            .lock()
            .unwrap()
            .last()
            .and_then(|(team, _)| team.clone())
    }
}

#[async_trait]
impl AvailabilityProvider for FakeProvider {
    async fn supported_tlds(&self, _team_id: Option<&str>) -> Result<Vec<String>, ProviderError> {
        self.tld_calls.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if self.fail_tlds {
            return Err(ProviderError::Status {
                status: 503,
                body: "tlds unavailable".to_string(),
            });
        }
        Ok(self.tlds.clone())
    }

    async fn bulk_availability(
        &self,
        team_id: Option<&str>,
        domains: &[String],
    ) -> Result<Vec<AvailabilityResult>, ProviderError> {
        self.availability_calls.fetch_add(1, Ordering::SeqCst);
        self.requests
            .lock()
            .unwrap()
            .push((team_id.map(String::from), domains.to_vec()));

        if self.fail_availability {
            return Err(ProviderError::Status {
                status: 500,
                body: "availability unavailable".to_string(),
            });
        }

        Ok(self.results.clone().unwrap_or_else(|| {
            domains
                .iter()
                .map(|domain| AvailabilityResult::structured(domain, true))
                .collect()
        }))
    }
}

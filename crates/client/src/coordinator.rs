//! Search-as-you-type coordination.
//!
//! [`SearchCoordinator`] turns a stream of query edits into at most one
//! search at a time:
//!
//! ```text
//! Idle -> Debouncing -> Fetching -> Settled
//!            |              |
//!            +--> Aborted <-+
//! ```
//!
//! Every edit restarts a debounce timer. When the timer fires, a fresh
//! cached result set for the exact query is shown immediately; otherwise the
//! previous request is cancelled and a new one is sent. Every edit takes a
//! fresh sequence number and a search may only change the view while its
//! number is still the latest, so a slow response for an older query can
//! never overwrite a newer one, even during the newer query's debounce.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use domain_search_core::{AvailabilityResult, TimedMemo};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::backend::SearchBackend;
use crate::config::ClientConfig;
use crate::url_state::UrlState;

/// Where the coordinator is in its search cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// No query, nothing pending.
    #[default]
    Idle,
    /// Waiting for typing to pause.
    Debouncing,
    /// A request is in flight.
    Fetching,
    /// The latest search finished, successfully or not.
    Settled,
    /// A pending search was dropped by clearing the query.
    Aborted,
}

/// Snapshot of everything a front end renders.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchView {
    /// The query as last typed.
    pub query: String,
    /// Current phase.
    pub phase: Phase,
    /// True while a request is in flight.
    pub loading: bool,
    /// Results of the last settled search, in provider order.
    pub results: Vec<AvailabilityResult>,
    /// Message for a failed search.
    pub error: Option<String>,
    /// The query the shown results belong to.
    pub settled_query: Option<String>,
}

impl SearchView {
    /// Whether the last search settled with nothing to show and no error.
    #[must_use]
    pub fn is_empty_result(&self) -> bool {
        self.phase == Phase::Settled && self.results.is_empty() && self.error.is_none()
    }
}

/// Debounced, cancellable, stale-safe search session.
///
/// Cheap to clone; clones drive the same session. Methods that start timers
/// must be called from within a Tokio runtime.
#[derive(Clone)]
pub struct SearchCoordinator {
    inner: Arc<Inner>,
}

struct Inner {
    backend: Arc<dyn SearchBackend>,
    url: Arc<dyn UrlState>,
    cache: TimedMemo<String, Arc<Vec<AvailabilityResult>>>,
    debounce: Duration,
    team_id: Option<String>,
    seq: AtomicU64,
    view: watch::Sender<SearchView>,
    tasks: Mutex<Tasks>,
}

#[derive(Default)]
struct Tasks {
    /// Sequence number of the most recent edit.
    latest: u64,
    debounce: Option<JoinHandle<()>>,
    in_flight: Option<CancellationToken>,
}

impl SearchCoordinator {
    /// Create a coordinator with explicit timings.
    #[must_use]
    pub fn new(
        backend: Arc<dyn SearchBackend>,
        url: Arc<dyn UrlState>,
        debounce: Duration,
        cache_ttl: Duration,
        team_id: Option<String>,
    ) -> Self {
        let (view, _) = watch::channel(SearchView::default());
        Self {
            inner: Arc::new(Inner {
                backend,
                url,
                cache: TimedMemo::new(cache_ttl),
                debounce,
                team_id,
                seq: AtomicU64::new(0),
                view,
                tasks: Mutex::new(Tasks::default()),
            }),
        }
    }

    /// Create a coordinator using the timings and team from `config`.
    #[must_use]
    pub fn from_config(
        backend: Arc<dyn SearchBackend>,
        url: Arc<dyn UrlState>,
        config: &ClientConfig,
    ) -> Self {
        Self::new(
            backend,
            url,
            config.debounce,
            config.cache_ttl,
            config.team_id.clone(),
        )
    }

    /// Subscribe to view snapshots.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SearchView> {
        self.inner.view.subscribe()
    }

    /// The current view.
    #[must_use]
    pub fn view(&self) -> SearchView {
        self.inner.view.borrow().clone()
    }

    /// Seed the query from the URL's `q` parameter, if present.
    ///
    /// Returns whether a search was scheduled.
    pub fn mount(&self) -> bool {
        match self.inner.url.query() {
            Some(query) if !query.trim().is_empty() => {
                self.set_query(&query);
                true
            }
            _ => false,
        }
    }

    /// Record an edit to the query.
    ///
    /// A blank query clears the session immediately. Anything else restarts
    /// the debounce timer.
    pub fn set_query(&self, query: &str) {
        if query.trim().is_empty() {
            self.reset(query);
            return;
        }

        let mut tasks = self.tasks();
        if let Some(timer) = tasks.debounce.take() {
            timer.abort();
        }
        let ticket = self.next_seq();
        tasks.latest = ticket;

        self.inner.view.send_modify(|view| {
            view.query = query.to_string();
            view.phase = Phase::Debouncing;
            view.loading = false;
        });

        let this = self.clone();
        let query = query.to_string();
        let delay = self.inner.debounce;
        tasks.debounce = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            this.run(query, ticket).await;
        }));
    }

    /// Drop the query, any pending search, and the shown results.
    pub fn clear(&self) {
        self.reset("");
    }

    fn reset(&self, query: &str) {
        let mut tasks = self.tasks();
        if let Some(timer) = tasks.debounce.take() {
            timer.abort();
        }
        if let Some(token) = tasks.in_flight.take() {
            token.cancel();
        }
        tasks.latest = self.next_seq();

        self.inner.view.send_modify(|view| {
            view.phase = match view.phase {
                Phase::Debouncing | Phase::Fetching => Phase::Aborted,
                _ => Phase::Idle,
            };
            view.query = query.to_string();
            view.loading = false;
            view.results.clear();
            view.error = None;
            view.settled_query = None;
        });
        self.inner.url.replace_query(None);
        drop(tasks);

        tracing::debug!("Search cleared");
    }

    /// Debounce expiry: serve from cache or issue a request.
    ///
    /// Does nothing if another edit or a clear has happened since `ticket`
    /// was taken.
    async fn run(&self, query: String, ticket: u64) {
        if let Some(results) = self.inner.cache.get(&query).await {
            {
                let mut tasks = self.tasks();
                if tasks.latest != ticket {
                    return;
                }
                if let Some(token) = tasks.in_flight.take() {
                    token.cancel();
                }
            }
            tracing::debug!(%query, "Serving cached results");
            self.settle(ticket, &query, Ok(results.as_ref().clone()));
            return;
        }

        let token = CancellationToken::new();
        {
            let mut tasks = self.tasks();
            if tasks.latest != ticket {
                tracing::debug!(%query, ticket, "Edit superseded before sending");
                return;
            }
            if let Some(previous) = tasks.in_flight.replace(token.clone()) {
                previous.cancel();
            }
            self.inner.view.send_modify(|view| {
                view.phase = Phase::Fetching;
                view.loading = true;
            });
        }

        // Detached so the next keystroke's timer reset does not abort it
        let this = self.clone();
        tokio::spawn(async move {
            let backend = Arc::clone(&this.inner.backend);
            let outcome = tokio::select! {
                () = token.cancelled() => None,
                result = backend.search(&query, this.inner.team_id.as_deref()) => Some(result),
            };

            match outcome {
                None => tracing::debug!(%query, ticket, "Search cancelled"),
                Some(Ok(results)) => {
                    this.inner
                        .cache
                        .set(query.clone(), Arc::new(results.clone()))
                        .await;
                    this.settle(ticket, &query, Ok(results));
                }
                Some(Err(e)) => {
                    tracing::warn!(%query, error = %e, "Search failed");
                    this.settle(ticket, &query, Err(e.to_string()));
                }
            }
        });
    }

    /// Apply a finished search if it is still the latest one.
    fn settle(&self, seq: u64, query: &str, outcome: Result<Vec<AvailabilityResult>, String>) {
        let mut tasks = self.tasks();
        if seq != tasks.latest {
            tracing::debug!(query, seq, latest = tasks.latest, "Discarding stale results");
            return;
        }
        tasks.in_flight = None;

        self.inner.view.send_modify(|view| {
            view.phase = Phase::Settled;
            view.loading = false;
            view.settled_query = Some(query.to_string());
            match outcome {
                Ok(results) => {
                    view.results = results;
                    view.error = None;
                }
                Err(message) => {
                    view.results.clear();
                    view.error = Some(message);
                }
            }
        });
        self.inner.url.replace_query(Some(query));
    }

    fn next_seq(&self) -> u64 {
        self.inner.seq.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn tasks(&self) -> MutexGuard<'_, Tasks> {
        self.inner
            .tasks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

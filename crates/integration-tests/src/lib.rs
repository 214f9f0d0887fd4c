//! Integration tests for Domain Search.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p domain-search-integration-tests
//! ```
//!
//! No external services are needed. Each test starts:
//!
//! - an [`Upstream`] server standing in for the registrar and Claude APIs
//! - the real search server, wired to the upstream with real HTTP clients
//!
//! and talks to the search server over HTTP, either directly with `reqwest`
//! or through the client's coordinator.
//!
//! # Test Categories
//!
//! - `search_api` - `POST /api/search` contract
//! - `coordinator` - debounced client session against a live server

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use secrecy::SecretString;
use serde::Deserialize;
use serde_json::{Value, json};

use domain_search_server::claude::ClaudeClient;
use domain_search_server::config::{ClaudeConfig, RegistrarConfig, SearchConfig, ServerConfig};
use domain_search_server::providers::RegistrarClient;
use domain_search_server::state::AppState;

/// Token the search server presents to the fake registrar.
pub const REGISTRAR_TOKEN: &str = "integration-registrar-token";

/// TLDs the fake registrar supports, deliberately not in priority order.
pub const SUPPORTED_TLDS: &[&str] = &[
    ".shop", "com", "net", "org", "dev", "io", "app", "ai", "co", "xyz", "tech", "site", "online",
    "me", "info", "store", "club", "blog", "cloud", "design", "fun", "live", "news", "space",
    "studio", "team", "tools", "world", "zone", "rocks", "COM",
];

/// Behaviour of the fake upstream.
#[derive(Debug, Clone, Default)]
pub struct UpstreamOptions {
    /// Text Claude answers with; `None` disables label generation.
    pub label_reply: Option<String>,
    /// Answer availability checks with HTTP 500.
    pub fail_availability: bool,
    /// Delay before answering availability checks.
    pub availability_delay: Option<Duration>,
}

#[derive(Default)]
struct UpstreamState {
    options: UpstreamOptions,
    tld_calls: AtomicUsize,
    availability_calls: AtomicUsize,
    generation_calls: AtomicUsize,
    last_domains: Mutex<Vec<String>>,
    last_team: Mutex<Option<String>>,
    last_auth: Mutex<Option<String>>,
}

/// Fake registrar and Claude API on an ephemeral port.
#[derive(Clone)]
pub struct Upstream {
    state: Arc<UpstreamState>,
    url: String,
}

#[derive(Deserialize)]
struct TeamQuery {
    #[serde(rename = "teamId")]
    team_id: Option<String>,
}

#[derive(Deserialize)]
struct AvailabilityBody {
    domains: Vec<String>,
}

impl Upstream {
    /// Start the fake upstream.
    pub async fn start(options: UpstreamOptions) -> Self {
        let state = Arc::new(UpstreamState {
            options,
            ..UpstreamState::default()
        });

        let router = Router::new()
            .route("/v1/registrar/tlds/supported", get(supported_tlds))
            .route("/v1/registrar/domains/availability", post(availability))
            .route("/v1/messages", post(messages))
            .with_state(state.clone());

        let addr = serve(router).await;
        Self {
            state,
            url: format!("http://{addr}"),
        }
    }

    /// Base URL of the fake upstream.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[must_use]
    pub fn tld_calls(&self) -> usize {
        self.state.tld_calls.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn availability_calls(&self) -> usize {
        self.state.availability_calls.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn generation_calls(&self) -> usize {
        self.state.generation_calls.load(Ordering::SeqCst)
    }

    /// Domains sent with the most recent availability check.
    #[must_use]
    pub fn last_domains(&self) -> Vec<String> {
        self.state.last_domains.lock().unwrap().clone()
    }

    /// `teamId` sent with the most recent availability check.
    #[must_use]
    pub fn last_team(&self) -> Option<String> {
        self.state.last_team.lock().unwrap().clone()
    }

    /// `Authorization` header sent with the most recent registrar call.
    #[must_use]
    pub fn last_auth(&self) -> Option<String> {
        self.state.last_auth.lock().unwrap().clone()
    }
}

fn record_auth(state: &UpstreamState, headers: &HeaderMap) {
    *state.last_auth.lock().unwrap() = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(String::from);
}

async fn supported_tlds(
    State(state): State<Arc<UpstreamState>>,
    headers: HeaderMap,
) -> Json<Value> {
    state.tld_calls.fetch_add(1, Ordering::SeqCst);
    record_auth(&state, &headers);
    Json(json!({ "tlds": SUPPORTED_TLDS }))
}

async fn availability(
    State(state): State<Arc<UpstreamState>>,
    Query(query): Query<TeamQuery>,
    headers: HeaderMap,
    Json(body): Json<AvailabilityBody>,
) -> Response {
    state.availability_calls.fetch_add(1, Ordering::SeqCst);
    record_auth(&state, &headers);
    state.last_team.lock().unwrap().clone_from(&query.team_id);
    state.last_domains.lock().unwrap().clone_from(&body.domains);

    if let Some(delay) = state.options.availability_delay {
        tokio::time::sleep(delay).await;
    }

    if state.options.fail_availability {
        return (StatusCode::INTERNAL_SERVER_ERROR, "registrar exploded").into_response();
    }

    let results: Vec<Value> = body
        .domains
        .iter()
        .enumerate()
        .map(|(i, domain)| json!({ "domain": domain, "available": i % 2 == 0 }))
        .collect();
    Json(json!({ "results": results })).into_response()
}

async fn messages(State(state): State<Arc<UpstreamState>>) -> Response {
    state.generation_calls.fetch_add(1, Ordering::SeqCst);

    match &state.options.label_reply {
        Some(text) => Json(json!({
            "id": "msg_test",
            "model": "claude-3-5-haiku-latest",
            "stop_reason": "end_turn",
            "content": [{ "type": "text", "text": text }],
            "usage": { "input_tokens": 40, "output_tokens": 5 }
        }))
        .into_response(),
        None => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "type": "error",
                "error": { "type": "overloaded_error", "message": "Overloaded" }
            })),
        )
            .into_response(),
    }
}

/// The search server under test.
pub struct TestServer {
    pub upstream: Upstream,
    pub url: String,
    pub http: reqwest::Client,
}

impl TestServer {
    /// Start a fake upstream and a search server wired to it.
    pub async fn start(options: UpstreamOptions) -> Self {
        let upstream = Upstream::start(options).await;

        let timeout = Duration::from_secs(5);
        let config = ServerConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 0,
            registrar: RegistrarConfig {
                base_url: upstream.url().to_string(),
                token: SecretString::from(REGISTRAR_TOKEN),
                default_team_id: None,
                timeout,
            },
            claude: Some(ClaudeConfig {
                api_key: SecretString::from("integration-claude-key"),
                model: "claude-3-5-haiku-latest".to_string(),
                timeout,
            }),
            search: SearchConfig::default(),
            sentry_dsn: None,
            sentry_environment: None,
        };

        let registrar = RegistrarClient::new(&config.registrar).unwrap();
        let claude = ClaudeClient::with_endpoint(
            config.claude.as_ref().unwrap(),
            &format!("{}/v1/messages", upstream.url()),
        )
        .unwrap();

        let state = AppState::from_parts(&config, Arc::new(registrar), Arc::new(claude));
        let addr = serve(domain_search_server::app(state, None)).await;

        Self {
            upstream,
            url: format!("http://{addr}"),
            http: reqwest::Client::new(),
        }
    }

    /// POST a raw JSON body to `/api/search`.
    pub async fn post_search(&self, body: Value) -> (StatusCode, Value) {
        let response = self
            .http
            .post(format!("{}/api/search", self.url))
            .json(&body)
            .send()
            .await
            .unwrap();

        let status = StatusCode::from_u16(response.status().as_u16()).unwrap();
        (status, response.json().await.unwrap())
    }
}

/// Serve `router` on an ephemeral local port.
async fn serve(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

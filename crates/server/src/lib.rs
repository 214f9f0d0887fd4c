//! Domain Search API server library.
//!
//! Turns free-form queries into candidate domains and checks their
//! availability with a registrar. Exposed as a library so the router can be
//! driven in-process by tests.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod claude;
pub mod config;
pub mod error;
pub mod middleware;
pub mod providers;
pub mod routes;
pub mod services;
pub mod state;

use axum::{
    Router,
    body::Body,
    http::Request,
    middleware::from_fn,
    routing::get,
};
use tower_http::trace::TraceLayer;

use middleware::{RateLimiterLayer, request_id_middleware};
use state::AppState;

/// Build the application router.
///
/// `rate_limit`, when given, wraps the API routes only; `/health` is never
/// limited.
pub fn app(state: AppState, rate_limit: Option<RateLimiterLayer>) -> Router {
    let api = match rate_limit {
        Some(limiter) => routes::routes().layer(limiter),
        None => routes::routes(),
    };

    Router::new()
        .route("/health", get(health))
        .merge(api)
        .layer(from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = tracing::field::Empty,
                )
            }),
        )
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check upstreams.
async fn health() -> &'static str {
    "ok"
}

//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health       - Liveness check
//! POST /api/search   - Candidate domains with availability
//! ```

pub mod search;

use axum::Router;

use crate::state::AppState;

/// Build the API router.
pub fn routes() -> Router<AppState> {
    Router::new().merge(search::router())
}

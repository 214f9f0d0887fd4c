//! Unified error handling with Sentry integration.
//!
//! Handlers return `Result<T, AppError>`. Upstream failures are captured to
//! Sentry before a JSON `{ "error": ... }` body is sent back.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use domain_search_core::ErrorResponse;
use thiserror::Error;

use crate::services::SearchError;

/// Application-level error type for the search API.
#[derive(Debug, Error)]
pub enum AppError {
    /// A search could not reach or understand an upstream provider.
    #[error("Search error: {0}")]
    Search(#[from] SearchError),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

}

impl AppError {
    const fn status(&self) -> StatusCode {
        match self {
            Self::Search(_) => StatusCode::BAD_GATEWAY,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if matches!(self, Self::Search(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        // Provider bodies stay in the logs
        let message = match &self {
            Self::Search(SearchError::Tlds(_)) => "Failed to load supported TLDs".to_string(),
            Self::Search(SearchError::Availability(_)) => {
                "Failed to check domain availability".to_string()
            }
            Self::BadRequest(_) => self.to_string(),
        };

        (self.status(), Json(ErrorResponse { error: message })).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

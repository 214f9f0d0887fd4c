//! Wire contract for `POST /api/search`.

use serde::{Deserialize, Serialize};

use super::availability::AvailabilityResult;

/// Request body for `POST /api/search`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    /// Raw query text as typed by the user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    /// Opaque team identifier passed through to the registrar.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_id: Option<String>,
}

impl SearchRequest {
    /// Build a request for a query, optionally scoped to a team.
    #[must_use]
    pub fn new(q: impl Into<String>, team_id: Option<String>) -> Self {
        Self {
            q: Some(q.into()),
            team_id,
        }
    }

    /// The query text, or an empty string when absent.
    #[must_use]
    pub fn query(&self) -> &str {
        self.q.as_deref().unwrap_or_default()
    }
}

/// Successful response body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Provider results in provider order.
    pub domains: Vec<AvailabilityResult>,
}

/// Error response body, sent with a 4xx/5xx status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable message safe to show to users.
    pub error: String,
}

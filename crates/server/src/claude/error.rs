//! Ways a label generation request can fail.
//!
//! None of these reach the HTTP caller: the label synthesizer logs them and
//! falls back to the compacted query.

use reqwest::StatusCode;
use thiserror::Error;

use super::types::ErrorEnvelope;

/// Longest slice of an unparseable error body kept in the message.
const MAX_BODY_CHARS: usize = 200;

/// Errors from a Claude Messages API call.
#[derive(Debug, Error)]
pub enum ClaudeError {
    /// No response arrived (connect, timeout, body read).
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Claude is throttling or overloaded.
    #[error("Claude is busy (HTTP {status})")]
    Busy { status: u16 },

    /// The API key was rejected.
    #[error("API key rejected")]
    Unauthorized,

    /// Claude refused the request.
    #[error("request rejected (HTTP {status}): {message}")]
    Rejected { status: u16, message: String },

    /// A success response that is not a Messages API reply.
    #[error("unreadable response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The configured API key cannot be sent as a header.
    #[error("API key is not a valid header value")]
    InvalidApiKey,
}

impl ClaudeError {
    /// Classify a non-success response from its status and body.
    pub(crate) fn from_status(status: StatusCode, body: &str) -> Self {
        match status.as_u16() {
            401 | 403 => Self::Unauthorized,
            // 529 is Anthropic's "overloaded"
            429 | 503 | 529 => Self::Busy {
                status: status.as_u16(),
            },
            code => Self::Rejected {
                status: code,
                message: serde_json::from_str::<ErrorEnvelope>(body).map_or_else(
                    |_| body.chars().take(MAX_BODY_CHARS).collect(),
                    |envelope| envelope.error.message,
                ),
            },
        }
    }
}

//! Wire types for the Claude Messages API.
//!
//! Only what a single-turn, text-only request needs.

use serde::{Deserialize, Serialize};

/// A single user turn.
#[derive(Debug, Serialize)]
pub struct Message<'a> {
    pub role: &'static str,
    pub content: &'a str,
}

/// Request body.
#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub model: &'a str,
    pub max_tokens: u32,
    pub messages: [Message<'a>; 1],
}

impl<'a> ChatRequest<'a> {
    /// One user message, no system prompt.
    #[must_use]
    pub const fn single(model: &'a str, prompt: &'a str, max_tokens: u32) -> Self {
        Self {
            model,
            max_tokens,
            messages: [Message {
                role: "user",
                content: prompt,
            }],
        }
    }
}

/// A content block within a response.
#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
pub enum ContentBlock {
    #[serde(rename = "text")]
    Text { text: String },
    /// Any block type this client does not use.
    #[serde(other)]
    Other,
}

/// Response body; only the content is read.
#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub content: Vec<ContentBlock>,
}

impl ChatResponse {
    /// Concatenate every text block.
    #[must_use]
    pub fn text(&self) -> String {
        self.content
            .iter()
            .filter_map(|block| match block {
                ContentBlock::Text { text } => Some(text.as_str()),
                ContentBlock::Other => None,
            })
            .collect()
    }
}

/// `{ "error": { "message": ... } }` sent with non-success statuses.
#[derive(Debug, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serialization() {
        let request = ChatRequest::single("claude-3-5-haiku-latest", "Hello", 20);
        let json = serde_json::to_value(&request).expect("serialize");
        assert_eq!(json["model"], "claude-3-5-haiku-latest");
        assert_eq!(json["max_tokens"], 20);
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"], "Hello");
        assert!(json.get("system").is_none());
    }

    #[test]
    fn test_response_text_skips_other_blocks() {
        let json = r#"{
            "id": "msg_1",
            "stop_reason": "end_turn",
            "content": [
                {"type": "text", "text": "pet"},
                {"type": "tool_use", "id": "t", "name": "x", "input": {}},
                {"type": "text", "text": "pals"}
            ],
            "usage": {"input_tokens": 12, "output_tokens": 3}
        }"#;

        let response: ChatResponse = serde_json::from_str(json).expect("deserialize");
        assert_eq!(response.text(), "petpals");
    }
}

// ABOUTME: Tool response types bridging presenter output to the agent wire format
// ABOUTME: Every tool returns a single text content block carrying a JSON payload
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tool result types.
//!
//! Each tool returns [`ToolResponse`]: one text content block whose text is
//! the serialized JSON payload, plus an `isError` flag. Errors reuse the
//! stable error payload produced by [`AppError::to_json`].

use crate::errors::AppError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One content block in a tool response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentBlock {
    /// Block type; always `text`
    #[serde(rename = "type")]
    pub block_type: String,
    /// Serialized JSON payload
    pub text: String,
}

/// The agent-visible result of one tool invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolResponse {
    /// Content blocks; exactly one text block in practice
    pub content: Vec<ContentBlock>,
    /// Whether this response encodes an error
    pub is_error: bool,
}

fn text_block(payload: &Value) -> ContentBlock {
    ContentBlock {
        block_type: "text".to_owned(),
        text: serde_json::to_string(payload).unwrap_or_default(),
    }
}

impl ToolResponse {
    /// Wrap a successful payload
    #[must_use]
    pub fn success(payload: &Value) -> Self {
        Self {
            content: vec![text_block(payload)],
            is_error: false,
        }
    }

    /// Wrap an error payload
    #[must_use]
    pub fn error(payload: &Value) -> Self {
        Self {
            content: vec![text_block(payload)],
            is_error: true,
        }
    }

    /// Encode an [`AppError`] as a tool error response
    #[must_use]
    pub fn from_error(err: &AppError) -> Self {
        Self::error(&err.to_json())
    }

    /// Parse the payload back out of the first content block.
    /// Intended for tests and for the envelope's logging path.
    #[must_use]
    pub fn payload(&self) -> Option<Value> {
        self.content
            .first()
            .and_then(|block| serde_json::from_str(&block.text).ok())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn wire_shape_has_camel_case_flag_and_text_block() {
        let response = ToolResponse::success(&json!({"ok": true}));
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["isError"], false);
        assert_eq!(value["content"][0]["type"], "text");
        let payload: Value = serde_json::from_str(value["content"][0]["text"].as_str().unwrap()).unwrap();
        assert_eq!(payload["ok"], true);
    }
}

//! Custom endpoints with an unknown response shape
//!
//! Requests use the OpenAI chat shape (see [`super::openai::chat_request`]).
//! Responses are probed in order: `choices[0].message.content`, `content`,
//! `response`, `text`. When none match, the payload itself is returned.

use serde_json::Value;

/// Text payload of a custom endpoint response. Never fails.
pub fn parse_local_response(body: &str) -> String {
    let Ok(value) = serde_json::from_str::<Value>(body) else {
        return body.to_string();
    };

    if let Some(message) = value.pointer("/choices/0/message") {
        return message
            .get("content")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
    }

    ["content", "response", "text"]
        .iter()
        .find_map(|key| {
            value
                .get(key)
                .and_then(Value::as_str)
                .filter(|text| !text.is_empty())
        })
        .map(str::to_string)
        .unwrap_or_else(|| value.to_string())
}

//! Anthropic messages API (`POST /messages`)

use serde::{Deserialize, Serialize};

use super::openai::ChatMessage;
use super::{failure_message, EnvelopeError, MAX_TOKENS};

const PROVIDER: &str = "Anthropic";

/// Version header required by the messages API
pub const API_VERSION: &str = "2023-06-01";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MessagesRequest {
    pub model: String,
    pub system: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    text: Option<String>,
}

/// Build the request body.
///
/// Only `max_tokens` is set. No temperature is sent, so the API default is used.
pub fn messages_request(system: &str, prompt: &str, model: &str) -> MessagesRequest {
    MessagesRequest {
        model: model.to_string(),
        system: system.to_string(),
        messages: vec![ChatMessage::user(prompt)],
        max_tokens: MAX_TOKENS,
    }
}

/// Text of `content[0].text`.
pub fn parse_messages_response(body: &str) -> Result<String, EnvelopeError> {
    let response: MessagesResponse =
        serde_json::from_str(body).map_err(|e| EnvelopeError::invalid_json(PROVIDER, e))?;

    response
        .content
        .into_iter()
        .next()
        .and_then(|block| block.text)
        .ok_or(EnvelopeError::UnexpectedFormat(PROVIDER))
}

/// User-facing message for a failed messages call.
///
/// Unknown models and bad keys get dedicated hints; everything else carries
/// the upstream message.
pub fn describe_error(status: u16, body: &str, model: &str) -> String {
    let error_type = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.pointer("/error/type")
                .and_then(|t| t.as_str())
                .map(str::to_string)
        });

    match (status, error_type.as_deref()) {
        (404, Some("not_found_error")) => format!(
            "Anthropic API error: Model \"{model}\" not found. Please check the available models in your Anthropic account."
        ),
        (401, _) => {
            "Anthropic API error: Invalid API key. Please check your API key and try again."
                .to_string()
        }
        _ => format!("Anthropic API error: {}", failure_message(status, body)),
    }
}

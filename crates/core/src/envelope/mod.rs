//! Request and response envelopes for the supported LLM providers
//!
//! Each provider wraps the same `system + prompt → text` exchange in its own
//! JSON shape. This module holds the pure halves of every adapter: building
//! the request body and digging the single text payload out of the response.
//! The HTTP calls themselves live in the `scaffold` crate.

pub mod anthropic;
pub mod cohere;
pub mod gemini;
pub mod local;
pub mod ollama;
pub mod openai;

/// Sampling temperature sent to every provider that accepts one
pub const TEMPERATURE: f64 = 0.7;

/// Output token ceiling for all providers except Gemini
pub const MAX_TOKENS: u32 = 4000;

/// Output token ceiling for Gemini
pub const GEMINI_MAX_OUTPUT_TOKENS: u32 = 8192;

/// Failure to read the text payload out of a provider response
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EnvelopeError {
    #[error("Unexpected response format from {0} API")]
    UnexpectedFormat(&'static str),

    #[error("Invalid JSON from {provider} API: {reason}")]
    InvalidJson {
        provider: &'static str,
        reason: String,
    },
}

impl EnvelopeError {
    pub(crate) fn invalid_json(provider: &'static str, err: serde_json::Error) -> Self {
        EnvelopeError::InvalidJson {
            provider,
            reason: err.to_string(),
        }
    }
}

/// Best-effort error message from a failed provider response body.
///
/// Tries the shapes used by the supported providers, in order:
/// `{"error": {"message": ..}}`, `{"message": ..}`, `{"error": ".."}`,
/// `{"detail": ..}`. A non-JSON body is returned trimmed; an empty one
/// yields `None`.
pub fn upstream_error_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }

    let Ok(value) = serde_json::from_str::<serde_json::Value>(trimmed) else {
        return Some(trimmed.to_string());
    };

    ["/error/message", "/message", "/error", "/detail"]
        .iter()
        .find_map(|pointer| value.pointer(pointer).and_then(|v| v.as_str()))
        .map(str::to_string)
        .or_else(|| Some(trimmed.to_string()))
}

/// Message used when a provider fails without a readable body.
pub fn status_message(status: u16) -> String {
    format!("Request failed with status code {status}")
}

/// Upstream message, falling back to the status code.
pub fn failure_message(status: u16, body: &str) -> String {
    upstream_error_message(body).unwrap_or_else(|| status_message(status))
}

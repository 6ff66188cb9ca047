//! Ollama `/generate` (non-streaming)

use serde::{Deserialize, Serialize};

use super::EnvelopeError;
use crate::prompt::combine_prompt;

const PROVIDER: &str = "Ollama";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerateRequest {
    pub model: String,
    pub prompt: String,
    pub stream: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: Option<String>,
}

/// Build the request body.
///
/// No temperature or token limit is sent; the server's model defaults apply.
pub fn generate_request(system: &str, prompt: &str, model: &str) -> GenerateRequest {
    GenerateRequest {
        model: model.to_string(),
        prompt: combine_prompt(system, prompt),
        stream: false,
    }
}

/// `{api_url}/generate`; `api_url` is expected to point at the `/api` root.
pub fn generate_url(api_url: &str) -> String {
    format!("{}/generate", api_url.trim_end_matches('/'))
}

/// Text of the `response` field.
pub fn parse_generate_response(body: &str) -> Result<String, EnvelopeError> {
    let response: GenerateResponse =
        serde_json::from_str(body).map_err(|e| EnvelopeError::invalid_json(PROVIDER, e))?;

    response
        .response
        .ok_or(EnvelopeError::UnexpectedFormat(PROVIDER))
}

//! Cohere legacy generate endpoint (`POST /generate`)

use serde::{Deserialize, Serialize};

use super::{EnvelopeError, MAX_TOKENS, TEMPERATURE};
use crate::prompt::combine_prompt;

const PROVIDER: &str = "Cohere";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerateRequest {
    pub model: String,
    pub prompt: String,
    pub max_tokens: u32,
    pub temperature: f64,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    generations: Vec<Generation>,
}

#[derive(Debug, Deserialize)]
struct Generation {
    text: Option<String>,
}

pub fn generate_request(system: &str, prompt: &str, model: &str) -> GenerateRequest {
    GenerateRequest {
        model: model.to_string(),
        prompt: combine_prompt(system, prompt),
        max_tokens: MAX_TOKENS,
        temperature: TEMPERATURE,
    }
}

/// Text of `generations[0].text`.
pub fn parse_generate_response(body: &str) -> Result<String, EnvelopeError> {
    let response: GenerateResponse =
        serde_json::from_str(body).map_err(|e| EnvelopeError::invalid_json(PROVIDER, e))?;

    response
        .generations
        .into_iter()
        .next()
        .and_then(|generation| generation.text)
        .ok_or(EnvelopeError::UnexpectedFormat(PROVIDER))
}

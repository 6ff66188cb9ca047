//! Gemini `generateContent`

use serde::{Deserialize, Serialize};

use super::{EnvelopeError, GEMINI_MAX_OUTPUT_TOKENS, TEMPERATURE};
use crate::prompt::combine_prompt;

const PROVIDER: &str = "Gemini";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Content {
    pub role: String,
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f64,
    pub max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

/// Gemini has no system role here; instructions travel in the user turn.
pub fn generate_content_request(system: &str, prompt: &str) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content {
            role: "user".to_string(),
            parts: vec![Part {
                text: Some(combine_prompt(system, prompt)),
            }],
        }],
        generation_config: GenerationConfig {
            temperature: TEMPERATURE,
            max_output_tokens: GEMINI_MAX_OUTPUT_TOKENS,
        },
    }
}

/// Path of the `generateContent` method for `model`, relative to the API base.
pub fn generate_content_path(model: &str) -> String {
    let model = model.strip_prefix("models/").unwrap_or(model);
    format!("models/{model}:generateContent")
}

/// Concatenated text parts of the first candidate.
pub fn parse_generate_content_response(body: &str) -> Result<String, EnvelopeError> {
    let response: GenerateContentResponse =
        serde_json::from_str(body).map_err(|e| EnvelopeError::invalid_json(PROVIDER, e))?;

    let parts = response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| content.parts)
        .filter(|parts| !parts.is_empty())
        .ok_or(EnvelopeError::UnexpectedFormat(PROVIDER))?;

    Ok(parts.into_iter().filter_map(|part| part.text).collect())
}

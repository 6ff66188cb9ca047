//! Generation request model and validation
//!
//! The HTTP layer deserializes untrusted input into [`GenerateBody`]. The only
//! way to obtain a [`GenerationRequest`] is [`GenerateBody::validate`], so every
//! request that reaches a provider adapter already satisfies the credential rules.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Supported LLM providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    OpenAI,
    Anthropic,
    Gemini,
    Cohere,
    Ollama,
    /// Custom endpoint speaking an OpenAI-like chat protocol
    Local,
}

impl Provider {
    /// Every provider, in the order the UI lists them.
    pub const ALL: [Provider; 6] = [
        Provider::OpenAI,
        Provider::Anthropic,
        Provider::Gemini,
        Provider::Cohere,
        Provider::Ollama,
        Provider::Local,
    ];

    /// Identifier used on the wire (`provider` field of the request body)
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::OpenAI => "openai",
            Provider::Anthropic => "anthropic",
            Provider::Gemini => "gemini",
            Provider::Cohere => "cohere",
            Provider::Ollama => "ollama",
            Provider::Local => "local",
        }
    }

    /// Human readable name used in error messages
    pub fn display_name(&self) -> &'static str {
        match self {
            Provider::OpenAI => "OpenAI",
            Provider::Anthropic => "Anthropic",
            Provider::Gemini => "Gemini",
            Provider::Cohere => "Cohere",
            Provider::Ollama => "Ollama",
            Provider::Local => "Custom API",
        }
    }

    /// Self-hosted providers may run without credentials but need an endpoint.
    pub fn is_self_hosted(&self) -> bool {
        matches!(self, Provider::Ollama | Provider::Local)
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Provider::ALL
            .into_iter()
            .find(|provider| provider.as_str() == s)
            .ok_or(ValidationError::UnsupportedProvider)
    }
}

/// Reasons a request is rejected before any provider is contacted
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required parameters")]
    MissingParameters,

    #[error("API key is required")]
    MissingApiKey,

    #[error("API URL is required for this provider")]
    MissingApiUrl,

    #[error("Unsupported AI provider")]
    UnsupportedProvider,
}

/// Raw `POST /api/generate` body, exactly as the front-end sends it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateBody {
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default)]
    pub api_url: Option<String>,
}

/// A request that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub prompt: String,
    pub provider: Provider,
    pub model: String,
    pub api_key: Option<String>,
    pub api_url: Option<String>,
}

impl GenerateBody {
    /// Check required fields and the provider credential rules.
    ///
    /// Empty strings count as missing. The checks run in a fixed order:
    /// required fields, API key, API URL, then the provider name itself.
    pub fn validate(self) -> Result<GenerationRequest, ValidationError> {
        let prompt = non_empty(self.prompt);
        let model = non_empty(self.model);
        let provider = non_empty(self.provider);
        let api_key = non_empty(self.api_key);
        let api_url = non_empty(self.api_url);

        let (Some(prompt), Some(model), Some(provider)) = (prompt, model, provider) else {
            return Err(ValidationError::MissingParameters);
        };

        let self_hosted = provider
            .parse::<Provider>()
            .map(|p| p.is_self_hosted())
            .unwrap_or(false);

        if api_key.is_none() && !self_hosted {
            return Err(ValidationError::MissingApiKey);
        }

        if self_hosted && api_url.is_none() {
            return Err(ValidationError::MissingApiUrl);
        }

        let provider = provider.parse::<Provider>()?;

        Ok(GenerationRequest {
            prompt,
            provider,
            model,
            api_key,
            api_url,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(provider: &str, api_key: Option<&str>, api_url: Option<&str>) -> GenerateBody {
        GenerateBody {
            prompt: Some("A todo app".to_string()),
            model: Some("some-model".to_string()),
            api_key: api_key.map(str::to_string),
            provider: Some(provider.to_string()),
            api_url: api_url.map(str::to_string),
        }
    }

    #[test]
    fn test_provider_round_trips_through_str() {
        for provider in Provider::ALL {
            assert_eq!(provider.as_str().parse::<Provider>(), Ok(provider));
        }
    }

    #[test]
    fn test_provider_parse_unknown() {
        assert_eq!(
            "mistral".parse::<Provider>(),
            Err(ValidationError::UnsupportedProvider)
        );
    }

    #[test]
    fn test_provider_parse_is_case_sensitive() {
        assert!("OpenAI".parse::<Provider>().is_err());
    }

    #[test]
    fn test_provider_serde_lowercase() {
        let json = serde_json::to_string(&Provider::OpenAI).unwrap();
        assert_eq!(json, "\"openai\"");
    }

    #[test]
    fn test_body_deserializes_camel_case() {
        let body: GenerateBody = serde_json::from_str(
            r#"{"prompt":"p","model":"m","apiKey":"k","provider":"openai","apiUrl":null}"#,
        )
        .unwrap();

        assert_eq!(body.api_key.as_deref(), Some("k"));
        assert_eq!(body.api_url, None);
    }

    #[test]
    fn test_body_tolerates_missing_fields() {
        let body: GenerateBody = serde_json::from_str("{}").unwrap();
        assert_eq!(body, GenerateBody::default());
    }

    #[test]
    fn test_validate_openai_ok() {
        let request = body("openai", Some("sk-test"), None).validate().unwrap();
        assert_eq!(request.provider, Provider::OpenAI);
        assert_eq!(request.api_key.as_deref(), Some("sk-test"));
    }

    #[test]
    fn test_validate_missing_prompt() {
        let mut b = body("openai", Some("sk-test"), None);
        b.prompt = None;
        assert_eq!(b.validate(), Err(ValidationError::MissingParameters));
    }

    #[test]
    fn test_validate_empty_model_counts_as_missing() {
        let mut b = body("openai", Some("sk-test"), None);
        b.model = Some(String::new());
        assert_eq!(b.validate(), Err(ValidationError::MissingParameters));
    }

    #[test]
    fn test_validate_blank_api_key() {
        let result = body("openai", Some(""), None).validate();
        assert_eq!(result, Err(ValidationError::MissingApiKey));
    }

    #[test]
    fn test_validate_ollama_requires_url() {
        let result = body("ollama", None, None).validate();
        assert_eq!(result, Err(ValidationError::MissingApiUrl));
    }

    #[test]
    fn test_validate_ollama_without_key() {
        let request = body("ollama", None, Some("http://localhost:11434/api"))
            .validate()
            .unwrap();
        assert_eq!(request.provider, Provider::Ollama);
        assert_eq!(request.api_key, None);
    }

    #[test]
    fn test_validate_local_requires_url() {
        let result = body("local", Some("k"), None).validate();
        assert_eq!(result, Err(ValidationError::MissingApiUrl));
    }

    #[test]
    fn test_validate_unknown_provider_without_key() {
        // Unknown providers are treated like hosted ones for the key check.
        let result = body("mistral", None, None).validate();
        assert_eq!(result, Err(ValidationError::MissingApiKey));
    }

    #[test]
    fn test_validate_unknown_provider_with_key() {
        let result = body("mistral", Some("k"), None).validate();
        assert_eq!(result, Err(ValidationError::UnsupportedProvider));
    }

    #[test]
    fn test_validation_messages() {
        assert_eq!(
            ValidationError::MissingParameters.to_string(),
            "Missing required parameters"
        );
        assert_eq!(
            ValidationError::MissingApiUrl.to_string(),
            "API URL is required for this provider"
        );
    }
}

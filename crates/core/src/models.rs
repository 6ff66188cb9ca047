//! Model catalog offered for each provider
//!
//! The first entry of every list is the provider's default model.

use serde::Serialize;

use crate::request::Provider;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Model {
    pub id: &'static str,
    pub name: &'static str,
}

const fn model(id: &'static str, name: &'static str) -> Model {
    Model { id, name }
}

const OPENAI: &[Model] = &[
    model("gpt-4o", "GPT-4o"),
    model("gpt-4-turbo", "GPT-4 Turbo"),
    model("gpt-4", "GPT-4"),
    model("gpt-3.5-turbo", "GPT-3.5 Turbo"),
];

const ANTHROPIC: &[Model] = &[
    model("claude-3-opus-20240229", "Claude 3 Opus"),
    model("claude-3-7-sonnet-20250219", "Claude 3 Sonnet"),
    model("claude-3-haiku-20240307", "Claude 3 Haiku"),
    model("claude-2.1", "Claude 2.1"),
    model("claude-2.0", "Claude 2.0"),
    model("claude-instant-1.2", "Claude Instant 1.2"),
];

const GEMINI: &[Model] = &[
    model("gemini-1.5-pro", "Gemini 1.5 Pro"),
    model("gemini-1.5-flash", "Gemini 1.5 Flash"),
    model("gemini-1.0-pro", "Gemini 1.0 Pro"),
];

const COHERE: &[Model] = &[
    model("command-r-plus", "Command R+"),
    model("command-r", "Command R"),
    model("command", "Command"),
];

const OLLAMA: &[Model] = &[
    model("llama3", "Llama 3"),
    model("mistral", "Mistral"),
    model("codellama", "Code Llama"),
    model("llava", "LLaVA"),
    model("custom", "Custom Model"),
];

const LOCAL: &[Model] = &[model("custom-api", "Custom API Endpoint")];

/// Models listed for `provider`, default first. Never empty.
pub fn models(provider: Provider) -> &'static [Model] {
    match provider {
        Provider::OpenAI => OPENAI,
        Provider::Anthropic => ANTHROPIC,
        Provider::Gemini => GEMINI,
        Provider::Cohere => COHERE,
        Provider::Ollama => OLLAMA,
        Provider::Local => LOCAL,
    }
}

/// Model picked when a provider is chosen without one.
pub fn default_model(provider: Provider) -> &'static str {
    models(provider)[0].id
}

/// Label shown in provider pickers
pub fn provider_label(provider: Provider) -> &'static str {
    match provider {
        Provider::Gemini => "Google Gemini",
        other => other.display_name(),
    }
}

/// One provider with its label and models
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    pub id: Provider,
    pub name: &'static str,
    pub models: &'static [Model],
}

impl CatalogEntry {
    pub fn new(provider: Provider) -> Self {
        Self {
            id: provider,
            name: provider_label(provider),
            models: models(provider),
        }
    }
}

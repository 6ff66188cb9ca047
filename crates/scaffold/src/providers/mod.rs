//! Provider adapters and their registry
//!
//! Every adapter turns one [`Completion`] into exactly one HTTP call and
//! returns the provider's text payload untouched. Request and response shapes
//! come from `scaffold_core::envelope`; this module only does the I/O.

pub mod anthropic;
#[cfg(feature = "cohere")]
pub mod cohere;
#[cfg(feature = "gemini")]
pub mod gemini;
pub mod local;
pub mod ollama;
pub mod openai;

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use scaffold_core::envelope::failure_message;
use scaffold_core::request::Provider;

use crate::prelude::*;

pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com/v1";
pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const COHERE_BASE_URL: &str = "https://api.cohere.ai/v1";

/// One validated generation call
#[derive(Debug, Clone, Copy)]
pub struct Completion<'a> {
    /// Enhanced prompt
    pub prompt: &'a str,
    pub model: &'a str,
    pub api_key: Option<&'a str>,
    /// Endpoint for self-hosted providers
    pub api_url: Option<&'a str>,
}

/// Uniform interface over the provider APIs
#[async_trait]
pub trait ProviderAdapter: Send + Sync {
    fn provider(&self) -> Provider;

    /// Run one completion and return the provider's text unmodified.
    async fn complete(&self, completion: Completion<'_>) -> Result<String, Error>;
}

/// Base URLs of the hosted providers
#[derive(Debug, Clone, clap::Args)]
pub struct ProviderEndpoints {
    /// OpenAI API base URL
    #[arg(long, env = "OPENAI_BASE_URL", default_value = OPENAI_BASE_URL)]
    pub openai_base_url: String,

    /// Anthropic API base URL
    #[arg(long, env = "ANTHROPIC_BASE_URL", default_value = ANTHROPIC_BASE_URL)]
    pub anthropic_base_url: String,

    /// Gemini API base URL
    #[arg(long, env = "GEMINI_BASE_URL", default_value = GEMINI_BASE_URL)]
    pub gemini_base_url: String,

    /// Cohere API base URL
    #[arg(long, env = "COHERE_BASE_URL", default_value = COHERE_BASE_URL)]
    pub cohere_base_url: String,
}

impl Default for ProviderEndpoints {
    fn default() -> Self {
        Self {
            openai_base_url: OPENAI_BASE_URL.to_string(),
            anthropic_base_url: ANTHROPIC_BASE_URL.to_string(),
            gemini_base_url: GEMINI_BASE_URL.to_string(),
            cohere_base_url: COHERE_BASE_URL.to_string(),
        }
    }
}

/// Adapters available to the dispatcher, keyed by provider
#[derive(Clone, Default)]
pub struct Registry {
    adapters: BTreeMap<Provider, Arc<dyn ProviderAdapter>>,
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("providers", &self.providers())
            .finish()
    }
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `adapter`, replacing any adapter for the same provider.
    pub fn register(&mut self, adapter: Arc<dyn ProviderAdapter>) {
        self.adapters.insert(adapter.provider(), adapter);
    }

    pub fn with(mut self, adapter: Arc<dyn ProviderAdapter>) -> Self {
        self.register(adapter);
        self
    }

    pub fn get(&self, provider: Provider) -> Option<Arc<dyn ProviderAdapter>> {
        self.adapters.get(&provider).cloned()
    }

    /// Registered providers, in declaration order.
    pub fn providers(&self) -> Vec<Provider> {
        self.adapters.keys().copied().collect()
    }

    /// Build every adapter this binary supports.
    ///
    /// Adapters that fail to initialize are left out with a warning; requests
    /// for them are answered with [`Error::ProviderUnavailable`].
    pub fn from_endpoints(endpoints: &ProviderEndpoints) -> Self {
        let mut registry = Registry::new();

        let client = match reqwest::Client::builder()
            .user_agent(concat!("scaffold/", env!("CARGO_PKG_VERSION")))
            .build()
        {
            Ok(client) => client,
            Err(e) => {
                log::warn!("Failed to build HTTP client, no provider is available: {e}");
                return registry;
            }
        };

        registry.try_register(
            Provider::OpenAI,
            openai::OpenAI::new(client.clone(), &endpoints.openai_base_url),
        );
        registry.try_register(
            Provider::Anthropic,
            anthropic::Anthropic::new(client.clone(), &endpoints.anthropic_base_url),
        );

        #[cfg(feature = "gemini")]
        registry.try_register(
            Provider::Gemini,
            gemini::Gemini::new(client.clone(), &endpoints.gemini_base_url),
        );
        #[cfg(not(feature = "gemini"))]
        log::warn!("Built without the `gemini` feature. Gemini models will not be available.");

        #[cfg(feature = "cohere")]
        registry.try_register(
            Provider::Cohere,
            cohere::Cohere::new(client.clone(), &endpoints.cohere_base_url),
        );
        #[cfg(not(feature = "cohere"))]
        log::warn!("Built without the `cohere` feature. Cohere models will not be available.");

        registry.register(Arc::new(ollama::Ollama::new(client.clone())));
        registry.register(Arc::new(local::Local::new(client)));

        registry
    }

    fn try_register<A>(&mut self, provider: Provider, adapter: Result<A>)
    where
        A: ProviderAdapter + 'static,
    {
        match adapter {
            Ok(adapter) => self.register(Arc::new(adapter)),
            Err(e) => log::warn!(
                "{} adapter disabled: {e}. {} models will not be available.",
                provider.display_name(),
                provider.display_name()
            ),
        }
    }
}

/// Status and body of a provider response
#[derive(Debug)]
pub(crate) struct Reply {
    pub status: u16,
    pub body: String,
}

impl Reply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Send `request` and buffer the response body.
///
/// Transport failures become [`Error::Network`]; HTTP error statuses are
/// returned as a normal [`Reply`] for the adapter to interpret.
pub(crate) async fn send(request: reqwest::RequestBuilder) -> Result<Reply, Error> {
    let response = request
        .send()
        .await
        .map_err(|e| Error::Network(e.to_string()))?;

    let status = response.status().as_u16();
    let body = response
        .text()
        .await
        .map_err(|e| Error::Network(e.to_string()))?;

    Ok(Reply { status, body })
}

/// Attach `Authorization: Bearer` when a key is present.
pub(crate) fn with_bearer(
    request: reqwest::RequestBuilder,
    api_key: Option<&str>,
) -> reqwest::RequestBuilder {
    match api_key {
        Some(key) => request.bearer_auth(key),
        None => request,
    }
}

/// `{provider} API error: {message}` for a non-success reply.
pub(crate) fn api_error(provider: Provider, reply: &Reply) -> Error {
    Error::ProviderApi(format!(
        "{} API error: {}",
        provider.display_name(),
        failure_message(reply.status, &reply.body)
    ))
}

/// Join `path` onto `base_url` without dropping the base's last segment.
pub(crate) fn endpoint(base_url: &str, path: &str) -> Result<reqwest::Url> {
    let url = format!("{}/{}", base_url.trim_end_matches('/'), path);
    reqwest::Url::parse(&url).map_err(|e| eyre!("Invalid provider URL {}: {}", url, e))
}

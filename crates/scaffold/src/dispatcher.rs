use scaffold_core::prompt::enhance_prompt;
use scaffold_core::request::{GenerateBody, Provider};

use crate::prelude::*;
use crate::providers::{Completion, Registry};

/// Validates generation requests and routes them to the registered adapter
#[derive(Debug, Clone)]
pub struct Dispatcher {
    registry: Registry,
}

impl Dispatcher {
    pub fn new(registry: Registry) -> Self {
        Self { registry }
    }

    /// Providers that can currently serve requests
    pub fn providers(&self) -> Vec<Provider> {
        self.registry.providers()
    }

    /// Run one generation and return the provider text as received.
    ///
    /// All validation happens before the adapter is called, so invalid
    /// requests never reach the network.
    pub async fn generate(&self, body: GenerateBody) -> Result<String, Error> {
        let request = body.validate()?;

        let adapter = self
            .registry
            .get(request.provider)
            .ok_or(Error::ProviderUnavailable(request.provider))?;

        let prompt = enhance_prompt(&request.prompt);

        log::info!(
            "Generating with {} model {} ({} prompt chars)",
            request.provider,
            request.model,
            request.prompt.len()
        );

        let result = adapter
            .complete(Completion {
                prompt: &prompt,
                model: &request.model,
                api_key: request.api_key.as_deref(),
                api_url: request.api_url.as_deref(),
            })
            .await;

        match &result {
            Ok(text) => log::info!(
                "{} returned {} chars",
                request.provider.display_name(),
                text.len()
            ),
            Err(err) => log::error!("Error generating code with {}: {err}", request.provider),
        }

        result
    }
}

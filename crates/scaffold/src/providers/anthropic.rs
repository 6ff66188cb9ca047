use async_trait::async_trait;
use scaffold_core::envelope::anthropic::{
    describe_error, messages_request, parse_messages_response, API_VERSION,
};
use scaffold_core::prompt::SYSTEM_PROMPT;
use scaffold_core::request::Provider;

use super::{endpoint, send, Completion, ProviderAdapter};
use crate::prelude::*;

/// Anthropic messages API
#[derive(Debug, Clone)]
pub struct Anthropic {
    client: reqwest::Client,
    url: reqwest::Url,
}

impl Anthropic {
    pub fn new(client: reqwest::Client, base_url: &str) -> Result<Self> {
        Ok(Self {
            client,
            url: endpoint(base_url, "messages")?,
        })
    }
}

#[async_trait]
impl ProviderAdapter for Anthropic {
    fn provider(&self) -> Provider {
        Provider::Anthropic
    }

    async fn complete(&self, completion: Completion<'_>) -> Result<String, Error> {
        log::debug!("Using Anthropic model: {}", completion.model);

        let body = messages_request(SYSTEM_PROMPT, completion.prompt, completion.model);
        let request = self
            .client
            .post(self.url.clone())
            .header("x-api-key", completion.api_key.unwrap_or_default())
            .header("anthropic-version", API_VERSION)
            .json(&body);

        let reply = send(request)
            .await
            .map_err(|e| e.context("Anthropic API error"))?;

        if !reply.is_success() {
            return Err(Error::ProviderApi(describe_error(
                reply.status,
                &reply.body,
                completion.model,
            )));
        }

        Ok(parse_messages_response(&reply.body)?)
    }
}

use async_trait::async_trait;
use scaffold_core::envelope::openai::{chat_request, parse_chat_response};
use scaffold_core::prompt::SYSTEM_PROMPT;
use scaffold_core::request::Provider;

use super::{api_error, endpoint, send, with_bearer, Completion, ProviderAdapter};
use crate::prelude::*;

/// OpenAI chat completions
#[derive(Debug, Clone)]
pub struct OpenAI {
    client: reqwest::Client,
    url: reqwest::Url,
}

impl OpenAI {
    pub fn new(client: reqwest::Client, base_url: &str) -> Result<Self> {
        Ok(Self {
            client,
            url: endpoint(base_url, "chat/completions")?,
        })
    }
}

#[async_trait]
impl ProviderAdapter for OpenAI {
    fn provider(&self) -> Provider {
        Provider::OpenAI
    }

    async fn complete(&self, completion: Completion<'_>) -> Result<String, Error> {
        let body = chat_request(SYSTEM_PROMPT, completion.prompt, completion.model);
        let request = with_bearer(
            self.client.post(self.url.clone()).json(&body),
            completion.api_key,
        );

        let reply = send(request).await?;
        if !reply.is_success() {
            return Err(api_error(Provider::OpenAI, &reply));
        }

        Ok(parse_chat_response(&reply.body)?)
    }
}

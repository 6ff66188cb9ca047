use async_trait::async_trait;
use scaffold_core::envelope::cohere::{generate_request, parse_generate_response};
use scaffold_core::prompt::SYSTEM_PROMPT;
use scaffold_core::request::Provider;

use super::{api_error, endpoint, send, with_bearer, Completion, ProviderAdapter};
use crate::prelude::*;

/// Cohere generate endpoint
#[derive(Debug, Clone)]
pub struct Cohere {
    client: reqwest::Client,
    url: reqwest::Url,
}

impl Cohere {
    pub fn new(client: reqwest::Client, base_url: &str) -> Result<Self> {
        Ok(Self {
            client,
            url: endpoint(base_url, "generate")?,
        })
    }
}

#[async_trait]
impl ProviderAdapter for Cohere {
    fn provider(&self) -> Provider {
        Provider::Cohere
    }

    async fn complete(&self, completion: Completion<'_>) -> Result<String, Error> {
        let body = generate_request(SYSTEM_PROMPT, completion.prompt, completion.model);
        let request = with_bearer(
            self.client.post(self.url.clone()).json(&body),
            completion.api_key,
        );

        let reply = send(request).await?;
        if !reply.is_success() {
            return Err(api_error(Provider::Cohere, &reply));
        }

        Ok(parse_generate_response(&reply.body)?)
    }
}

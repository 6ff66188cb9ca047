use async_trait::async_trait;
use scaffold_core::envelope::failure_message;
use scaffold_core::envelope::local::parse_local_response;
use scaffold_core::envelope::openai::chat_request;
use scaffold_core::prompt::SYSTEM_PROMPT;
use scaffold_core::request::{Provider, ValidationError};

use super::{send, with_bearer, Completion, ProviderAdapter};
use crate::prelude::*;

const CONTEXT: &str = "Failed to generate with local API";

/// Custom endpoint; posts an OpenAI-style chat request to `api_url` as given
#[derive(Debug, Clone)]
pub struct Local {
    client: reqwest::Client,
}

impl Local {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ProviderAdapter for Local {
    fn provider(&self) -> Provider {
        Provider::Local
    }

    async fn complete(&self, completion: Completion<'_>) -> Result<String, Error> {
        let api_url = completion.api_url.ok_or(ValidationError::MissingApiUrl)?;

        let body = chat_request(SYSTEM_PROMPT, completion.prompt, completion.model);
        let request = with_bearer(self.client.post(api_url).json(&body), completion.api_key);

        let reply = send(request).await.map_err(|e| e.context(CONTEXT))?;
        if !reply.is_success() {
            return Err(Error::ProviderApi(format!(
                "{CONTEXT}: {}",
                failure_message(reply.status, &reply.body)
            )));
        }

        Ok(parse_local_response(&reply.body))
    }
}

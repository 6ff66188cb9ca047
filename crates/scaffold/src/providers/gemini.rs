use async_trait::async_trait;
use scaffold_core::envelope::gemini::{
    generate_content_path, generate_content_request, parse_generate_content_response,
};
use scaffold_core::prompt::SYSTEM_PROMPT;
use scaffold_core::request::Provider;

use super::{api_error, endpoint, send, Completion, ProviderAdapter};
use crate::prelude::*;

/// Gemini `generateContent`
#[derive(Debug, Clone)]
pub struct Gemini {
    client: reqwest::Client,
    base_url: String,
}

impl Gemini {
    pub fn new(client: reqwest::Client, base_url: &str) -> Result<Self> {
        // The method path depends on the model, so only check the base here.
        reqwest::Url::parse(base_url)
            .map_err(|e| eyre!("Invalid provider URL {}: {}", base_url, e))?;

        Ok(Self {
            client,
            base_url: base_url.to_string(),
        })
    }
}

#[async_trait]
impl ProviderAdapter for Gemini {
    fn provider(&self) -> Provider {
        Provider::Gemini
    }

    async fn complete(&self, completion: Completion<'_>) -> Result<String, Error> {
        let url = endpoint(&self.base_url, &generate_content_path(completion.model))
            .map_err(|e| Error::ProviderApi(e.to_string()))?;

        let body = generate_content_request(SYSTEM_PROMPT, completion.prompt);
        let mut request = self.client.post(url).json(&body);
        if let Some(key) = completion.api_key {
            request = request.header("x-goog-api-key", key);
        }

        let reply = send(request).await?;
        if !reply.is_success() {
            return Err(api_error(Provider::Gemini, &reply));
        }

        Ok(parse_generate_content_response(&reply.body)?)
    }
}

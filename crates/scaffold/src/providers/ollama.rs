use async_trait::async_trait;
use scaffold_core::envelope::ollama::{generate_request, generate_url, parse_generate_response};
use scaffold_core::prompt::SYSTEM_PROMPT;
use scaffold_core::request::{Provider, ValidationError};

use super::{api_error, send, with_bearer, Completion, ProviderAdapter};
use crate::prelude::*;

/// Ollama server; the endpoint comes with every request
#[derive(Debug, Clone)]
pub struct Ollama {
    client: reqwest::Client,
}

impl Ollama {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ProviderAdapter for Ollama {
    fn provider(&self) -> Provider {
        Provider::Ollama
    }

    async fn complete(&self, completion: Completion<'_>) -> Result<String, Error> {
        let api_url = completion.api_url.ok_or(ValidationError::MissingApiUrl)?;

        let body = generate_request(SYSTEM_PROMPT, completion.prompt, completion.model);
        let request = with_bearer(
            self.client.post(generate_url(api_url)).json(&body),
            completion.api_key,
        );

        let reply = send(request).await?;
        if !reply.is_success() {
            return Err(api_error(Provider::Ollama, &reply));
        }

        Ok(parse_generate_response(&reply.body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_complete_without_api_key() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .and(body_partial_json(json!({"model": "llama3", "stream": false})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "model": "llama3",
                "response": "local output",
                "done": true
            })))
            .expect(1)
            .mount(&server)
            .await;

        let api_url = format!("{}/api", server.uri());
        let adapter = Ollama::new(reqwest::Client::new());
        let text = adapter
            .complete(Completion {
                prompt: "p",
                model: "llama3",
                api_key: None,
                api_url: Some(&api_url),
            })
            .await
            .unwrap();

        assert_eq!(text, "local output");

        let requests = server.received_requests().await.unwrap();
        assert!(requests[0].headers.get("authorization").is_none());
    }

    #[tokio::test]
    async fn test_complete_model_missing() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({"error": "model 'x' not found"})),
            )
            .mount(&server)
            .await;

        let adapter = Ollama::new(reqwest::Client::new());
        let err = adapter
            .complete(Completion {
                prompt: "p",
                model: "x",
                api_key: None,
                api_url: Some(&server.uri()),
            })
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Ollama API error: model 'x' not found");
    }

    #[tokio::test]
    async fn test_complete_requires_url() {
        let adapter = Ollama::new(reqwest::Client::new());
        let err = adapter
            .complete(Completion {
                prompt: "p",
                model: "x",
                api_key: None,
                api_url: None,
            })
            .await
            .unwrap_err();

        assert!(err.is_client_error());
    }
}

//! OpenAI chat completions (`POST /chat/completions`)

use serde::{Deserialize, Serialize};

use super::{EnvelopeError, MAX_TOKENS, TEMPERATURE};

const PROVIDER: &str = "OpenAI";

/// Chat message shared by the OpenAI-style and Anthropic request shapes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: &str) -> Self {
        Self {
            role: "system".to_string(),
            content: content.to_string(),
        }
    }

    pub fn user(content: &str) -> Self {
        Self {
            role: "user".to_string(),
            content: content.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f64,
    pub max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: Option<ChatResponseMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

/// Build a chat request with the system prompt as its first message.
pub fn chat_request(system: &str, prompt: &str, model: &str) -> ChatRequest {
    ChatRequest {
        model: model.to_string(),
        messages: vec![ChatMessage::system(system), ChatMessage::user(prompt)],
        temperature: TEMPERATURE,
        max_tokens: MAX_TOKENS,
    }
}

/// Text of `choices[0].message.content`.
pub fn parse_chat_response(body: &str) -> Result<String, EnvelopeError> {
    let response: ChatResponse =
        serde_json::from_str(body).map_err(|e| EnvelopeError::invalid_json(PROVIDER, e))?;

    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message)
        .and_then(|message| message.content)
        .ok_or(EnvelopeError::UnexpectedFormat(PROVIDER))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_chat_request_shape() {
        let request = chat_request("sys", "build it", "gpt-4o");

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "model": "gpt-4o",
                "messages": [
                    {"role": "system", "content": "sys"},
                    {"role": "user", "content": "build it"}
                ],
                "temperature": 0.7,
                "max_tokens": 4000
            })
        );
    }

    #[test]
    fn test_parse_chat_response() {
        let body = json!({
            "id": "chatcmpl-1",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "```rust\nfn main() {}\n```"}, "finish_reason": "stop"}
            ]
        })
        .to_string();

        assert_eq!(
            parse_chat_response(&body).unwrap(),
            "```rust\nfn main() {}\n```"
        );
    }

    #[test]
    fn test_parse_chat_response_no_choices() {
        assert_eq!(
            parse_chat_response(r#"{"choices":[]}"#),
            Err(EnvelopeError::UnexpectedFormat("OpenAI"))
        );
    }

    #[test]
    fn test_parse_chat_response_null_content() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":null}}]}"#;
        assert!(parse_chat_response(body).is_err());
    }

    #[test]
    fn test_parse_chat_response_invalid_json() {
        let err = parse_chat_response("<html>").unwrap_err();
        assert!(err.to_string().starts_with("Invalid JSON from OpenAI API"));
    }
}

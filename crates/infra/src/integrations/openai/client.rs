/// OpenAI Chat Completions client
use async_trait::async_trait;
use minutesync_core::{CompletionBackend, CompletionError};
use reqwest::Method;
use tracing::debug;

use super::types::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ResponseFormat};
use crate::http::HttpClient;
use crate::integrations::completion::{error_for_status, transport_error};

const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";
const DEFAULT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_TEMPERATURE: f32 = 0.2;
const SYSTEM_PROMPT: &str =
    "You extract structured information from meeting notes and reply with a single JSON object.";

pub struct OpenAIClient {
    http_client: HttpClient,
    api_key: String,
    model: String,
    temperature: f32,
    api_url: String,
}

impl OpenAIClient {
    pub fn new(api_key: impl Into<String>, http_client: HttpClient) -> Self {
        Self {
            http_client,
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            api_url: OPENAI_API_URL.to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Point the client at a compatible endpoint (full chat-completions URL).
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }
}

#[async_trait]
impl CompletionBackend for OpenAIClient {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        let payload = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage { role: "system".to_string(), content: SYSTEM_PROMPT.to_string() },
                ChatMessage { role: "user".to_string(), content: prompt.to_string() },
            ],
            temperature: self.temperature,
            response_format: ResponseFormat { format_type: "json_object".to_string() },
        };

        let request = self
            .http_client
            .request(Method::POST, &self.api_url)
            .bearer_auth(&self.api_key)
            .json(&payload);

        let response = self.http_client.send(request).await.map_err(transport_error)?;
        let status = response.status();
        debug!(status = status.as_u16(), model = %self.model, "received OpenAI response");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(error_for_status("OpenAI", status.as_u16(), &body));
        }

        let chat: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| CompletionError::InvalidResponse(format!("failed to parse response: {e}")))?;

        if let Some(usage) = &chat.usage {
            debug!(tokens = usage.total_tokens, "OpenAI token usage");
        }

        chat.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| CompletionError::InvalidResponse("response contained no content".into()))
    }

    fn name(&self) -> &str {
        "openai"
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn test_client(api_url: String) -> OpenAIClient {
        let http_client = HttpClient::builder()
            .timeout(Duration::from_secs(5))
            .max_attempts(1) // No retries in tests
            .build()
            .expect("http client");

        OpenAIClient::new("test-api-key", http_client).with_api_url(api_url)
    }

    #[tokio::test]
    async fn returns_message_content() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("Authorization", "Bearer test-api-key"))
            .and(body_partial_json(serde_json::json!({
                "model": "gpt-4o-mini",
                "response_format": {"type": "json_object"}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{"message": {"content": "{\"summary\": \"ok\"}"}}],
                "usage": {"total_tokens": 42}
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = test_client(format!("{}/v1/chat/completions", mock_server.uri()));
        let reply = client.complete("notes").await.expect("should complete");

        assert_eq!(reply, "{\"summary\": \"ok\"}");
    }

    #[tokio::test]
    async fn handles_authentication_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string("Invalid API key"))
            .mount(&mock_server)
            .await;

        let client = test_client(mock_server.uri());
        let result = client.complete("notes").await;

        assert!(matches!(result, Err(CompletionError::Authentication(_))));
    }

    #[tokio::test]
    async fn handles_rate_limit() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_string("Rate limit exceeded"))
            .mount(&mock_server)
            .await;

        let client = test_client(mock_server.uri());
        let err = client.complete("notes").await.expect_err("429");

        assert!(err.is_rate_limit());
    }

    #[tokio::test]
    async fn rejects_empty_choices() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"choices": []})))
            .mount(&mock_server)
            .await;

        let client = test_client(mock_server.uri());
        let result = client.complete("notes").await;

        assert!(matches!(result, Err(CompletionError::InvalidResponse(_))));
    }
}

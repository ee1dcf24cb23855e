/// Gemini generateContent client
use async_trait::async_trait;
use minutesync_core::{CompletionBackend, CompletionError};
use reqwest::Method;
use tracing::debug;

use super::types::{
    Content, ErrorEnvelope, GenerateContentRequest, GenerateContentResponse, GenerationConfig, Part,
};
use crate::http::HttpClient;
use crate::integrations::completion::{error_for_status, transport_error};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_MODEL: &str = "gemini-2.5-flash";
const DEFAULT_TEMPERATURE: f32 = 0.2;

pub struct GeminiClient {
    http_client: HttpClient,
    api_key: String,
    model: String,
    temperature: f32,
    api_base: String,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>, http_client: HttpClient) -> Self {
        Self {
            http_client,
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            api_base: GEMINI_API_BASE.to_string(),
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

    /// Override the API host (scheme and authority, no path).
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into().trim_end_matches('/').to_string();
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.api_base, self.model)
    }
}

#[async_trait]
impl CompletionBackend for GeminiClient {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        let payload = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part { text: Some(prompt.to_string()) }],
            }],
            generation_config: GenerationConfig {
                temperature: self.temperature,
                response_mime_type: "application/json".to_string(),
            },
        };

        let request = self
            .http_client
            .request(Method::POST, self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&payload);

        let response = self.http_client.send(request).await.map_err(transport_error)?;
        let status = response.status();
        debug!(status = status.as_u16(), model = %self.model, "received Gemini response");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            // Prefer the structured message; its status names quota exhaustion.
            let detail = serde_json::from_str::<ErrorEnvelope>(&body)
                .map(|env| format!("{} ({})", env.error.message, env.error.status))
                .unwrap_or(body);
            return Err(error_for_status("Gemini", status.as_u16(), &detail));
        }

        let generated: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| CompletionError::InvalidResponse(format!("failed to parse response: {e}")))?;

        if let Some(text) = generated.text() {
            return Ok(text);
        }

        let reason = generated
            .prompt_feedback
            .and_then(|f| f.block_reason)
            .or_else(|| generated.candidates.into_iter().next().and_then(|c| c.finish_reason))
            .unwrap_or_else(|| "no candidates".to_string());
        Err(CompletionError::InvalidResponse(format!("Gemini returned no text: {reason}")))
    }

    fn name(&self) -> &str {
        "gemini"
    }
}

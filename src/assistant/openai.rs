//! OpenAI-compatible response provider
//!
//! Talks to a chat-completions endpoint over HTTPS. Works with any service
//! speaking the OpenAI wire shape; the endpoint is overridable for
//! self-hosted gateways and tests.

use super::{ProviderError, ResponseProvider};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Default chat-completions endpoint
const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";

/// Default model
const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Reply length cap requested from the service
const MAX_TOKENS: u32 = 150;

/// Sampling temperature
const TEMPERATURE: f32 = 0.7;

/// Conversation framing sent as the system message
const SYSTEM_PROMPT: &str = "You are a helpful English conversation partner. \
    Help users practice English by engaging in natural conversation, \
    correcting mistakes gently, and encouraging them to speak more.";

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<RequestMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct RequestMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: String,
}

/// Network-backed response provider
pub struct OpenAiProvider {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
}

impl OpenAiProvider {
    /// Create a provider against the default OpenAI endpoint
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Point at a different chat-completions endpoint
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Use a different model
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    fn build_request<'a>(&'a self, prompt: &'a str) -> ChatCompletionRequest<'a> {
        ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                RequestMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                RequestMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        }
    }
}

/// Pull the first choice's content out of a completion body
fn extract_content(body: &str) -> Result<String, ProviderError> {
    let parsed: ChatCompletionResponse = serde_json::from_str(body)
        .map_err(|e| ProviderError::MalformedResponse(format!("invalid completion JSON: {}", e)))?;

    parsed
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content)
        .ok_or_else(|| ProviderError::MalformedResponse("response contained no choices".to_string()))
}

#[async_trait]
impl ResponseProvider for OpenAiProvider {
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        debug!(
            "Requesting completion from {} (model {})",
            self.endpoint, self.model
        );

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&self.build_request(prompt))
            .send()
            .await
            .map_err(|e| {
                ProviderError::Network(format!("Failed to reach {}: {}", self.endpoint, e))
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::Network(format!("Failed to read response body: {}", e)))?;

        if !status.is_success() {
            return Err(ProviderError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let content = extract_content(&body)?;
        debug!("Completion received ({} chars)", content.len());
        Ok(content)
    }

    fn name(&self) -> &'static str {
        "openai"
    }
}

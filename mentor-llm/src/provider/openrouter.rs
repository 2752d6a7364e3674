//! OpenRouter provider implementation
//!
//! OpenRouter speaks the OpenAI chat-completions format, so this also works
//! against any OpenAI-compatible endpoint given the right base URL.

use super::*;
use reqwest::Client;
use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";
pub const DEFAULT_MODEL: &str = "meta-llama/llama-3.1-8b-instant";

/// OpenRouter chat-completions provider
pub struct OpenRouterProvider {
    client: Client,
    config: ProviderConfig,
}

impl OpenRouterProvider {
    pub fn new(config: ProviderConfig) -> Result<Self> {
        let client = build_client(&config)?;
        Ok(Self { client, config })
    }

    fn base_url(&self) -> &str {
        self.config.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }
}

impl LlmProvider for OpenRouterProvider {
    fn name(&self) -> &str {
        "openrouter"
    }

    fn default_model(&self) -> &str {
        self.config.default_model.as_deref().unwrap_or(DEFAULT_MODEL)
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        let api_key = self
            .config
            .api_key
            .as_ref()
            .ok_or_else(|| Error::credential_missing("OPENROUTER_API_KEY"))
            .map_err(|e| e.with_operation("openrouter::complete"))?;

        let model = request.model.as_deref().unwrap_or(self.default_model());
        let timeout_secs = self.config.timeout();

        let api_request = OpenRouterRequest {
            model: model.to_string(),
            messages: request.messages.iter().map(OpenRouterMessage::from).collect(),
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        tracing::debug!(
            model,
            messages = api_request.messages.len(),
            "sending chat completion request"
        );

        let mut req = self
            .client
            .post(format!("{}/chat/completions", self.base_url()))
            .bearer_auth(api_key)
            .json(&api_request);

        for (key, value) in &self.config.headers {
            req = req.header(key, value);
        }

        let with_model = |e: Error| {
            e.with_operation("openrouter::complete")
                .with_context("model", model)
        };

        let response = req
            .send()
            .await
            .map_err(|e| with_model(transport_error(e, timeout_secs)))?;
        let body = read_body(response, timeout_secs).await.map_err(with_model)?;
        let api_response: OpenRouterResponse = decode(&body).map_err(with_model)?;

        let choice = api_response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| with_model(Error::response_malformed("no choices in response")))?;

        let finish_reason = match choice.finish_reason.as_deref() {
            Some("stop") => FinishReason::Stop,
            Some("length") => FinishReason::Length,
            Some("content_filter") => FinishReason::ContentFilter,
            _ => FinishReason::Unknown,
        };

        let usage = api_response
            .usage
            .map(|u| Usage {
                prompt_tokens: u.prompt_tokens,
                completion_tokens: u.completion_tokens,
                total_tokens: u.total_tokens,
            })
            .unwrap_or_default();

        Ok(CompletionResponse {
            id: api_response.id,
            model: api_response.model.unwrap_or_else(|| model.to_string()),
            content: choice.message.content,
            finish_reason,
            usage,
        })
    }
}

// ============================================================================
// OpenRouter API Types
// ============================================================================

#[derive(Debug, Serialize)]
struct OpenRouterRequest {
    model: String,
    messages: Vec<OpenRouterMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<usize>,
}

#[derive(Debug, Serialize)]
struct OpenRouterMessage {
    role: Role,
    content: String,
}

impl From<&ChatMessage> for OpenRouterMessage {
    fn from(msg: &ChatMessage) -> Self {
        Self {
            role: msg.role,
            content: msg.content.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct OpenRouterResponse {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    model: Option<String>,
    choices: Vec<OpenRouterChoice>,
    #[serde(default)]
    usage: Option<OpenRouterUsage>,
}

#[derive(Debug, Deserialize)]
struct OpenRouterChoice {
    message: OpenRouterResponseMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenRouterResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenRouterUsage {
    prompt_tokens: usize,
    completion_tokens: usize,
    total_tokens: usize,
}

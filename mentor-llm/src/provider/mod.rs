//! # LLM Provider Interface
//!
//! A trait-based abstraction for communicating with hosted LLM backends.
//!
//! ## Design
//! - `LlmProvider` trait defines the core interface
//! - Implementations for OpenRouter (OpenAI-compatible) and Google Gemini
//! - Missing credentials, transport failures, bad statuses and unexpected
//!   response shapes all come back as `mentor_error::Error`

pub mod gemini;
pub mod openrouter;

pub use gemini::GeminiProvider;
pub use openrouter::OpenRouterProvider;

use mentor_error::{Error, ErrorKind, Result};
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// Timeout applied when a config does not set one.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

// ============================================================================
// Core Types
// ============================================================================

/// A chat message in the conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// Request parameters for a completion
#[derive(Debug, Clone, Default)]
pub struct CompletionRequest {
    pub messages: Vec<ChatMessage>,
    pub model: Option<String>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<usize>,
}

impl CompletionRequest {
    pub fn new(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages,
            ..Default::default()
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_temperature(mut self, temp: f32) -> Self {
        self.temperature = Some(temp);
        self
    }

    pub fn with_max_tokens(mut self, max: usize) -> Self {
        self.max_tokens = Some(max);
        self
    }
}

/// Response from a completion request
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    pub id: Option<String>,
    pub model: String,
    pub content: Option<String>,
    pub finish_reason: FinishReason,
    pub usage: Usage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishReason {
    Stop,
    Length,
    ContentFilter,
    Unknown,
}

/// Token usage information
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Usage {
    pub prompt_tokens: usize,
    pub completion_tokens: usize,
    pub total_tokens: usize,
}

// ============================================================================
// Provider Trait
// ============================================================================

/// The main LLM provider trait
#[allow(async_fn_in_trait)]
pub trait LlmProvider: Send + Sync {
    /// Get the provider name (e.g., "openrouter", "gemini")
    fn name(&self) -> &str;

    /// Get the default model
    fn default_model(&self) -> &str;

    /// Send a completion request and get a full response
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse>;

    /// Simple prompt -> response helper
    async fn prompt(&self, prompt: &str) -> Result<String> {
        self.chat(vec![ChatMessage::user(prompt)]).await
    }

    /// Chat with message history
    async fn chat(&self, messages: Vec<ChatMessage>) -> Result<String> {
        let request = CompletionRequest::new(messages);
        let response = self.complete(request).await?;
        response
            .content
            .ok_or_else(|| Error::response_malformed("no content in response"))
    }
}

// ============================================================================
// Provider Configuration
// ============================================================================

/// Configuration for creating providers
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub provider_type: ProviderType,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub default_model: Option<String>,
    pub headers: HashMap<String, String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderType {
    OpenRouter,
    Gemini,
}

impl ProviderConfig {
    /// OpenRouter chat completions. An empty key counts as absent.
    pub fn openrouter(api_key: Option<String>) -> Self {
        Self {
            provider_type: ProviderType::OpenRouter,
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            base_url: Some(openrouter::DEFAULT_BASE_URL.into()),
            default_model: Some(openrouter::DEFAULT_MODEL.into()),
            headers: HashMap::new(),
            timeout_secs: Some(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Google Gemini generate-content. An empty key counts as absent.
    pub fn gemini(api_key: Option<String>) -> Self {
        Self {
            provider_type: ProviderType::Gemini,
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            base_url: Some(gemini::DEFAULT_BASE_URL.into()),
            default_model: Some(gemini::DEFAULT_MODEL.into()),
            headers: HashMap::new(),
            timeout_secs: Some(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = Some(model.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into().trim_end_matches('/').to_string());
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn timeout(&self) -> u64 {
        self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)
    }
}

// ============================================================================
// Shared HTTP plumbing
// ============================================================================

pub(crate) fn build_client(config: &ProviderConfig) -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(config.timeout()))
        .build()
        .map_err(|e| {
            Error::config_invalid("failed to create HTTP client")
                .with_operation("provider::build_client")
                .set_source(e)
        })
}

/// Classify a reqwest transport error.
pub(crate) fn transport_error(err: reqwest::Error, timeout_secs: u64) -> Error {
    let base = if err.is_timeout() {
        Error::timeout(timeout_secs)
    } else {
        Error::network_failed(err.to_string())
    };
    base.set_source(err)
}

/// Turn a non-success response into a typed error, or hand back the body text.
pub(crate) async fn read_body(response: Response, timeout_secs: u64) -> Result<String> {
    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| transport_error(e, timeout_secs))?;

    if status.is_success() {
        return Ok(text);
    }

    let err = match status.as_u16() {
        401 | 403 => Error::new(
            ErrorKind::AuthenticationFailed,
            format!("HTTP {}: credential rejected", status.as_u16()),
        )
        .with_context("status", status.as_u16().to_string()),
        429 => Error::new(ErrorKind::RateLimited, "HTTP 429: rate limit exceeded")
            .with_context("status", "429"),
        code => Error::api_failed(code, text),
    };
    Err(err)
}

pub(crate) fn decode<T: serde::de::DeserializeOwned>(body: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|e| {
        Error::response_malformed(format!("unexpected response shape: {}", e)).set_source(e)
    })
}

// ============================================================================
// Tests
// ============================================================================

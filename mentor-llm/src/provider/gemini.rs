//! Google Gemini provider implementation
//!
//! Uses the `generateContent` REST endpoint with the API key passed as the
//! `key` query parameter.

use super::*;
use reqwest::Client;
use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Gemini generate-content provider
pub struct GeminiProvider {
    client: Client,
    config: ProviderConfig,
}

impl GeminiProvider {
    pub fn new(config: ProviderConfig) -> Result<Self> {
        let client = build_client(&config)?;
        Ok(Self { client, config })
    }

    fn base_url(&self) -> &str {
        self.config.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }
}

impl LlmProvider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    fn default_model(&self) -> &str {
        self.config.default_model.as_deref().unwrap_or(DEFAULT_MODEL)
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        let api_key = self
            .config
            .api_key
            .as_ref()
            .ok_or_else(|| Error::credential_missing("GEMINI_API_KEY"))
            .map_err(|e| e.with_operation("gemini::complete"))?;

        let model = request.model.as_deref().unwrap_or(self.default_model());
        let timeout_secs = self.config.timeout();

        // System messages go to systemInstruction, the rest become contents.
        let mut system_parts = Vec::new();
        let mut contents = Vec::new();
        for msg in &request.messages {
            match msg.role {
                Role::System => system_parts.push(Part {
                    text: msg.content.clone(),
                }),
                Role::User => contents.push(Content::text("user", &msg.content)),
                Role::Assistant => contents.push(Content::text("model", &msg.content)),
            }
        }

        let generation_config = if request.temperature.is_some() || request.max_tokens.is_some() {
            Some(GenerationConfig {
                temperature: request.temperature,
                max_output_tokens: request.max_tokens,
            })
        } else {
            None
        };

        let api_request = GeminiRequest {
            contents,
            system_instruction: if system_parts.is_empty() {
                None
            } else {
                Some(Content {
                    role: None,
                    parts: system_parts,
                })
            },
            generation_config,
        };

        tracing::debug!(
            model,
            contents = api_request.contents.len(),
            "sending generate-content request"
        );

        let mut req = self
            .client
            .post(format!("{}/models/{}:generateContent", self.base_url(), model))
            .query(&[("key", api_key.as_str())])
            .json(&api_request);

        for (key, value) in &self.config.headers {
            req = req.header(key, value);
        }

        let with_model = |e: Error| e.with_operation("gemini::complete").with_context("model", model);

        let response = req
            .send()
            .await
            .map_err(|e| with_model(transport_error(e, timeout_secs)))?;
        let body = read_body(response, timeout_secs).await.map_err(with_model)?;
        let api_response: GeminiResponse = decode(&body).map_err(with_model)?;

        let candidate = api_response
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| with_model(Error::response_malformed("no candidates in response")))?;

        let text = candidate
            .content
            .parts
            .into_iter()
            .next()
            .map(|p| p.text)
            .ok_or_else(|| with_model(Error::response_malformed("candidate has no parts")))?;

        let finish_reason = match candidate.finish_reason.as_deref() {
            Some("STOP") => FinishReason::Stop,
            Some("MAX_TOKENS") => FinishReason::Length,
            Some("SAFETY") => FinishReason::ContentFilter,
            _ => FinishReason::Unknown,
        };

        let usage = api_response
            .usage_metadata
            .map(|u| Usage {
                prompt_tokens: u.prompt_token_count,
                completion_tokens: u.candidates_token_count,
                total_tokens: u.total_token_count,
            })
            .unwrap_or_default();

        Ok(CompletionResponse {
            id: None,
            model: api_response.model_version.unwrap_or_else(|| model.to_string()),
            content: Some(text),
            finish_reason,
            usage,
        })
    }
}

// ============================================================================
// Gemini API Types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<Part>,
}

impl Content {
    fn text(role: &str, text: &str) -> Self {
        Self {
            role: Some(role.to_string()),
            parts: vec![Part {
                text: text.to_string(),
            }],
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<usize>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    candidates: Vec<Candidate>,
    #[serde(default)]
    usage_metadata: Option<UsageMetadata>,
    #[serde(default)]
    model_version: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: CandidateContent,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: usize,
    #[serde(default)]
    candidates_token_count: usize,
    #[serde(default)]
    total_token_count: usize,
}

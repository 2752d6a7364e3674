//! # Mentor LLM
//!
//! Thin clients for the hosted language models the mentor pipeline talks to.
//!
//! ## Core Concepts
//! - **Provider**: Trait-based LLM communication (`LlmProvider`)
//! - **OpenRouter**: OpenAI-compatible chat completions with bearer auth
//! - **Gemini**: Google generate-content with the API key as a query parameter
//! - **Errors**: every failure is a typed `mentor_error::Error`

pub mod provider;

pub use mentor_error::{Error, ErrorKind, ErrorStatus, Result};
pub use provider::{
    ChatMessage, CompletionRequest, CompletionResponse, FinishReason, GeminiProvider,
    LlmProvider, OpenRouterProvider, ProviderConfig, ProviderType, Role, Usage,
};

//! Student agent - answers the task with a chat-completion model

use crate::pipeline::{Stage, StageContext};
use mentor_error::Result;
use mentor_llm::{ChatMessage, LlmProvider, OpenRouterProvider, ProviderConfig};

pub const STUDENT_SYSTEM_PROMPT: &str = "You are a student trying to solve the task.";

/// Sends the raw task to a chat model and returns its answer.
pub struct StudentAgent<P = OpenRouterProvider> {
    provider: P,
}

impl StudentAgent<OpenRouterProvider> {
    /// Build a student backed by OpenRouter.
    pub fn from_config(config: ProviderConfig) -> Result<Self> {
        Ok(Self::new(OpenRouterProvider::new(config)?))
    }
}

impl<P: LlmProvider> StudentAgent<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub async fn answer(&self, task: &str) -> Result<String> {
        let messages = vec![ChatMessage::system(STUDENT_SYSTEM_PROMPT), ChatMessage::user(task)];
        self.provider
            .chat(messages)
            .await
            .map_err(|e| e.with_operation("student::answer"))
    }
}

impl<P: LlmProvider> Stage for StudentAgent<P> {
    fn name(&self) -> &'static str {
        "student"
    }

    fn agent(&self) -> &'static str {
        "Student Agent"
    }

    async fn run(&self, ctx: &StageContext) -> Result<String> {
        self.answer(ctx.input()).await
    }
}

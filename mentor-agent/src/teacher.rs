//! Teacher agent - grades the student's answer

use crate::pipeline::{Stage, StageContext};
use mentor_error::Result;
use mentor_llm::{GeminiProvider, LlmProvider, ProviderConfig};

/// Build the evaluation prompt sent to the teacher model.
///
/// The four requested sections are a request to the model only; the reply is
/// treated as opaque text.
pub fn evaluation_prompt(task: &str, student_answer: &str) -> String {
    format!(
        "You are a teacher evaluating a student's answer.

Original Question/Task:
{task}

Student's Answer:
{student_answer}

Please evaluate the student's answer and provide:
1. Corrections (if any mistakes found)
2. Improvements (suggestions to make it better)
3. Score (out of 10)
4. Summary (brief overall assessment)

Format your response clearly with sections."
    )
}

/// Sends the task and the student's answer to a generation model for critique.
pub struct TeacherAgent<P = GeminiProvider> {
    provider: P,
}

impl TeacherAgent<GeminiProvider> {
    /// Build a teacher backed by Gemini.
    pub fn from_config(config: ProviderConfig) -> Result<Self> {
        Ok(Self::new(GeminiProvider::new(config)?))
    }
}

impl<P: LlmProvider> TeacherAgent<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub async fn evaluate(&self, task: &str, student_answer: &str) -> Result<String> {
        let prompt = evaluation_prompt(task, student_answer);
        self.provider
            .prompt(&prompt)
            .await
            .map_err(|e| e.with_operation("teacher::evaluate"))
    }
}

impl<P: LlmProvider> Stage for TeacherAgent<P> {
    fn name(&self) -> &'static str {
        "teacher"
    }

    fn agent(&self) -> &'static str {
        "Teacher Agent"
    }

    /// Grades whatever the previous stage displayed, sentinel strings included.
    async fn run(&self, ctx: &StageContext) -> Result<String> {
        self.evaluate(ctx.input(), &ctx.previous_text()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_task_and_answer() {
        let prompt = evaluation_prompt("What is 6 x 7?", "It is 41.");
        assert!(prompt.starts_with("You are a teacher evaluating a student's answer."));
        assert!(prompt.contains("Original Question/Task:\nWhat is 6 x 7?\n"));
        assert!(prompt.contains("Student's Answer:\nIt is 41.\n"));
        assert!(prompt.contains("3. Score (out of 10)"));
        assert!(prompt.ends_with("Format your response clearly with sections."));
    }

    #[test]
    fn test_prompt_keeps_braces_verbatim() {
        let prompt = evaluation_prompt("fn main() {}", "{\"a\": 1}");
        assert!(prompt.contains("fn main() {}"));
        assert!(prompt.contains("{\"a\": 1}"));
    }
}

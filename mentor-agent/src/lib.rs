//! # Mentor Agent
//!
//! Two agents run as a fixed, sequential pipeline:
//! 1. The student agent answers the user's task
//! 2. The teacher agent critiques that answer against the original task
//!
//! Each agent returns a typed `Result`; the pipeline turns failures into
//! display strings prefixed with the failing agent's name, so one failed
//! stage never hides the other stage's output.

mod pipeline;
mod student;
mod teacher;

pub use pipeline::{Pipeline, PipelineReport, Stage, StageContext, StageOutput};
pub use student::{StudentAgent, STUDENT_SYSTEM_PROMPT};
pub use teacher::{evaluation_prompt, TeacherAgent};

/// The pipeline the web front-end runs: OpenRouter student, Gemini teacher.
pub type MentorPipeline =
    Pipeline<StudentAgent<mentor_llm::OpenRouterProvider>, TeacherAgent<mentor_llm::GeminiProvider>>;

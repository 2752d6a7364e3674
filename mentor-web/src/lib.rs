//! # Mentor Web
//!
//! A one-page front-end: the user submits a task, the student agent answers
//! it, the teacher agent grades the answer, and the page shows all three.

pub mod config;
pub mod page;
pub mod routes;

pub use config::Config;
pub use routes::{create_router, AppState, EvaluationResponse};

use mentor_agent::{MentorPipeline, Pipeline, StudentAgent, TeacherAgent};

/// Wire both agents from configuration. Missing credentials are not an error
/// here; the affected agent reports them on every call.
pub fn build_pipeline(config: &Config) -> mentor_error::Result<MentorPipeline> {
    let student = StudentAgent::from_config(config.student_provider())?;
    let teacher = TeacherAgent::from_config(config.teacher_provider())?;
    Ok(Pipeline::new(student, teacher))
}

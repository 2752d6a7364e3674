use axum::{
    extract::{rejection::FormRejection, State},
    response::Html,
    routing::{get, post},
    Form, Json, Router,
};
use mentor_agent::{MentorPipeline, PipelineReport};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::page::{self, PageView};

/// Application state shared across routes
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<MentorPipeline>,
}

impl AppState {
    pub fn new(pipeline: MentorPipeline) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
        }
    }
}

/// Form and JSON body: the task typed by the user.
#[derive(Debug, Deserialize)]
pub struct TaskForm {
    #[serde(default)]
    pub user_input: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct EvaluationResponse {
    pub user_input: String,
    pub student_output: String,
    pub teacher_feedback: String,
}

impl From<PipelineReport> for EvaluationResponse {
    fn from(report: PipelineReport) -> Self {
        Self {
            student_output: report.student_text(),
            teacher_feedback: report.teacher_text(),
            user_input: report.input,
        }
    }
}

/// Create router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index).post(submit))
        .route("/api/evaluate", post(evaluate))
        .route("/health", get(|| async { "OK" }))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET / - empty form
async fn index() -> Html<String> {
    Html(page::render(&PageView::default()))
}

/// POST / - run the pipeline and render both outputs.
///
/// A body that is not urlencoded counts as a missing `user_input`.
async fn submit(
    State(state): State<AppState>,
    form: Result<Form<TaskForm>, FormRejection>,
) -> Html<String> {
    let user_input = match form {
        Ok(Form(form)) => form.user_input,
        Err(rejection) => {
            tracing::debug!(%rejection, "unreadable form body, treating task as blank");
            String::new()
        }
    };
    let result = run(&state, &user_input).await;
    Html(page::render(&PageView {
        user_input: result.user_input,
        student_output: result.student_output,
        teacher_feedback: result.teacher_feedback,
    }))
}

/// POST /api/evaluate - same pipeline, JSON in and out
async fn evaluate(
    State(state): State<AppState>,
    Json(form): Json<TaskForm>,
) -> Json<EvaluationResponse> {
    Json(run(&state, &form.user_input).await)
}

async fn run(state: &AppState, user_input: &str) -> EvaluationResponse {
    let report = state.pipeline.run(user_input).await;
    if report.is_skipped() {
        tracing::info!("blank task submitted, nothing to evaluate");
    } else {
        tracing::info!(
            chars = user_input.len(),
            student_ok = report.output("student").is_some_and(|o| o.is_ok()),
            teacher_ok = report.output("teacher").is_some_and(|o| o.is_ok()),
            "task evaluated"
        );
    }
    report.into()
}

//! Sequential stage runner

use mentor_error::Result;
use std::time::Instant;

/// One step of the pipeline.
#[allow(async_fn_in_trait)]
pub trait Stage: Send + Sync {
    /// Short identifier used in logs and reports (e.g. "student")
    fn name(&self) -> &'static str;

    /// Display name used as the error prefix (e.g. "Student Agent")
    fn agent(&self) -> &'static str;

    async fn run(&self, ctx: &StageContext) -> Result<String>;
}

/// What a stage can see: the original input and every earlier output.
#[derive(Debug)]
pub struct StageContext {
    input: String,
    outputs: Vec<StageOutput>,
}

impl StageContext {
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            outputs: Vec::new(),
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn outputs(&self) -> &[StageOutput] {
        &self.outputs
    }

    /// Display text of the most recent stage, or empty if none ran yet.
    pub fn previous_text(&self) -> String {
        self.outputs.last().map(StageOutput::text).unwrap_or_default()
    }

    fn record(&mut self, output: StageOutput) {
        self.outputs.push(output);
    }
}

/// Result of a single stage.
#[derive(Debug)]
pub struct StageOutput {
    pub stage: &'static str,
    pub agent: &'static str,
    pub result: Result<String>,
}

impl StageOutput {
    /// The payload, or `"Error in <agent>: <message>"` on failure.
    pub fn text(&self) -> String {
        match &self.result {
            Ok(text) => text.clone(),
            Err(err) => format!("Error in {}: {}", self.agent, err.message()),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Everything one request produced.
#[derive(Debug)]
pub struct PipelineReport {
    pub input: String,
    pub outputs: Vec<StageOutput>,
}

impl PipelineReport {
    /// True when the input was blank and no stage ran.
    pub fn is_skipped(&self) -> bool {
        self.outputs.is_empty()
    }

    pub fn output(&self, stage: &str) -> Option<&StageOutput> {
        self.outputs.iter().find(|o| o.stage == stage)
    }

    /// Display text for a stage; empty if it did not run.
    pub fn text_of(&self, stage: &str) -> String {
        self.output(stage).map(StageOutput::text).unwrap_or_default()
    }

    pub fn student_text(&self) -> String {
        self.text_of("student")
    }

    pub fn teacher_text(&self) -> String {
        self.text_of("teacher")
    }
}

/// Runs a student stage, then a teacher stage that sees the student's output.
pub struct Pipeline<S, T> {
    student: S,
    teacher: T,
}

impl<S: Stage, T: Stage> Pipeline<S, T> {
    pub fn new(student: S, teacher: T) -> Self {
        Self { student, teacher }
    }

    pub fn teacher(&self) -> &T {
        &self.teacher
    }

    pub async fn run(&self, input: &str) -> PipelineReport {
        if input.trim().is_empty() {
            tracing::debug!("blank input, skipping all stages");
            return PipelineReport {
                input: input.to_string(),
                outputs: Vec::new(),
            };
        }

        let mut ctx = StageContext::new(input);

        let output = run_stage(&self.student, &ctx).await;
        ctx.record(output);

        let output = run_stage(&self.teacher, &ctx).await;
        ctx.record(output);

        PipelineReport {
            input: ctx.input,
            outputs: ctx.outputs,
        }
    }
}

async fn run_stage<St: Stage>(stage: &St, ctx: &StageContext) -> StageOutput {
    let started = Instant::now();
    let result = stage.run(ctx).await;
    let elapsed_ms = started.elapsed().as_millis() as u64;

    match &result {
        Ok(text) => tracing::info!(
            stage = stage.name(),
            elapsed_ms,
            chars = text.len(),
            "stage finished"
        ),
        Err(err) => tracing::warn!(
            stage = stage.name(),
            elapsed_ms,
            kind = %err.kind(),
            error = %err,
            "stage failed"
        ),
    }

    StageOutput {
        stage: stage.name(),
        agent: stage.agent(),
        result,
    }
}

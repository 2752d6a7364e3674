//! # Mentor
//!
//! Usage:
//!   mentor                 serve the web form (default)
//!   mentor serve --port 8080
//!   mentor ask <task>      run the student/teacher pipeline once and print it
//!
//! Credentials come from `OPENROUTER_API_KEY` and `GEMINI_API_KEY`
//! (a `.env` file in the working directory is read too).

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mentor_web::{build_pipeline, create_router, AppState, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "mentor")]
#[command(author, version, about = "Mentor - a student model answers, a teacher model grades")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Per-call timeout for each agent, in seconds
    #[arg(short, long, global = true)]
    timeout: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the web form
    Serve {
        /// Address to bind
        #[arg(long, env = "HOST")]
        host: Option<String>,

        /// Port to bind
        #[arg(short, long, env = "PORT")]
        port: Option<u16>,
    },
    /// Run one task through both agents and print the results
    Ask {
        /// The task description
        #[arg(trailing_var_arg = true, required = true)]
        task: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let mut config = Config::from_env()?;
    if let Some(secs) = cli.timeout {
        config.timeout_secs = secs;
    }

    tracing::info!(
        student_key_loaded = config.student.api_key.is_some(),
        teacher_key_loaded = config.teacher.api_key.is_some(),
        student_model = %config.student.model,
        teacher_model = %config.teacher.model,
        timeout_secs = config.timeout_secs,
        "configuration loaded"
    );
    if config.student.api_key.is_none() {
        tracing::warn!("OPENROUTER_API_KEY not set - student agent will report an error");
    }
    if config.teacher.api_key.is_none() {
        tracing::warn!("GEMINI_API_KEY not set - teacher agent will report an error");
    }

    match cli.command {
        Some(Commands::Ask { task }) => ask(&config, &task.join(" ")).await,
        Some(Commands::Serve { host, port }) => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            serve(config).await
        }
        None => serve(config).await,
    }
}

async fn serve(config: Config) -> Result<()> {
    let pipeline = build_pipeline(&config).context("Failed to build agents")?;
    let app = create_router(AppState::new(pipeline));

    let addr = config.server_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    Ok(())
}

async fn ask(config: &Config, task: &str) -> Result<()> {
    let pipeline = build_pipeline(config).context("Failed to build agents")?;
    let report = pipeline.run(task).await;

    if report.is_skipped() {
        anyhow::bail!("task is empty");
    }

    println!("=== Student Answer ===\n{}\n", report.student_text());
    println!("=== Teacher Feedback ===\n{}", report.teacher_text());
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "mentor=info,mentor_web=info,mentor_agent=info,mentor_llm=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

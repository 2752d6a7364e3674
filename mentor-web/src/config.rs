use anyhow::{Context, Result};
use mentor_llm::provider::{gemini, openrouter, DEFAULT_TIMEOUT_SECS};
use mentor_llm::ProviderConfig;
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub student: AgentConfig,
    pub teacher: AgentConfig,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Where one agent sends its requests. `api_key` is `None` when unset or blank.
#[derive(Debug, Clone)]
pub struct AgentConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        // Load .env file if it exists (for local development)
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());
        let credential = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let config = Config {
            server: ServerConfig {
                host: or("HOST", "127.0.0.1"),
                port: or("PORT", "5000").parse().context("Failed to parse PORT")?,
            },
            student: AgentConfig {
                api_key: credential("OPENROUTER_API_KEY"),
                base_url: or("OPENROUTER_BASE_URL", openrouter::DEFAULT_BASE_URL),
                model: or("STUDENT_MODEL", openrouter::DEFAULT_MODEL),
            },
            teacher: AgentConfig {
                api_key: credential("GEMINI_API_KEY"),
                base_url: or("GEMINI_BASE_URL", gemini::DEFAULT_BASE_URL),
                model: or("TEACHER_MODEL", gemini::DEFAULT_MODEL),
            },
            timeout_secs: or("AGENT_TIMEOUT_SECS", &DEFAULT_TIMEOUT_SECS.to_string())
                .parse()
                .context("Failed to parse AGENT_TIMEOUT_SECS")?,
        };

        Ok(config)
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn student_provider(&self) -> ProviderConfig {
        ProviderConfig::openrouter(self.student.api_key.clone())
            .with_base_url(&self.student.base_url)
            .with_model(&self.student.model)
            .with_timeout(self.timeout_secs)
    }

    pub fn teacher_provider(&self) -> ProviderConfig {
        ProviderConfig::gemini(self.teacher.api_key.clone())
            .with_base_url(&self.teacher.base_url)
            .with_model(&self.teacher.model)
            .with_timeout(self.timeout_secs)
    }
}

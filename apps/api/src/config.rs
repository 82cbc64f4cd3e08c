use std::time::Duration;

use anyhow::{anyhow, Context, Result};

use crate::llm_client::{LlmProvider, LlmSettings};
use crate::screening::router::ClassificationMode;

/// Application configuration loaded from environment variables.
/// Startup fails if the selected provider's API key is missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub llm_provider: LlmProvider,
    pub llm_api_key: String,
    pub llm_model: String,
    pub llm_base_url: Option<String>,
    pub llm_timeout_secs: u64,
    pub llm_max_attempts: u32,
    pub classification_mode: ClassificationMode,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable lookup.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let llm_provider = match var("LLM_PROVIDER") {
            Some(value) => LlmProvider::parse(&value)
                .ok_or_else(|| anyhow!("LLM_PROVIDER must be 'openai' or 'anthropic', got '{value}'"))?,
            None => LlmProvider::default(),
        };

        let key_var = match llm_provider {
            LlmProvider::OpenAi => "OPENAI_API_KEY",
            LlmProvider::Anthropic => "ANTHROPIC_API_KEY",
        };

        let classification_mode = match var("SCREENING_CLASSIFICATION_MODE") {
            Some(value) => ClassificationMode::parse(&value).ok_or_else(|| {
                anyhow!("SCREENING_CLASSIFICATION_MODE must be 'exact' or 'normalized', got '{value}'")
            })?,
            None => ClassificationMode::default(),
        };

        Ok(Config {
            llm_provider,
            llm_api_key: var(key_var)
                .with_context(|| format!("Required environment variable '{key_var}' is not set"))?,
            llm_model: var("LLM_MODEL").unwrap_or_else(|| llm_provider.default_model().to_string()),
            llm_base_url: var("LLM_BASE_URL"),
            llm_timeout_secs: parse_or(&var, "LLM_TIMEOUT_SECS", 60)?,
            llm_max_attempts: parse_or(&var, "LLM_MAX_ATTEMPTS", 3)?,
            classification_mode,
            port: parse_or(&var, "PORT", 8080)?,
            rust_log: var("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }

    pub fn llm_settings(&self) -> LlmSettings {
        LlmSettings {
            provider: self.llm_provider,
            api_key: self.llm_api_key.clone(),
            model: self.llm_model.clone(),
            base_url: self.llm_base_url.clone(),
            timeout: Duration::from_secs(self.llm_timeout_secs),
            max_attempts: self.llm_max_attempts,
        }
    }
}

fn parse_or<T>(var: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match var(key) {
        Some(value) => value
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{value}'")),
        None => Ok(default),
    }
}

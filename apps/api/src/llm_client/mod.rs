/// LLM Client — the single point of entry for all completion calls in the screener.
///
/// ARCHITECTURAL RULE: No other module may call a provider API directly.
/// Screening steps depend on the `CompletionService` trait; `LlmClient` is the
/// production implementation and is injected at startup.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub mod wire;

use wire::{
    AnthropicError, AnthropicRequest, ChatCompletionResponse, ChatMessage, MessagesResponse,
    OpenAiError, OpenAiRequest,
};

const ANTHROPIC_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 1024;

pub const OPENAI_DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const ANTHROPIC_DEFAULT_MODEL: &str = "claude-sonnet-4-5";
const OPENAI_BASE_URL: &str = "https://api.openai.com";
const ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Rate limited after {retries} retries")]
    RateLimited { retries: u32 },

    #[error("LLM returned empty content")]
    EmptyContent,

    #[error("LLM client misconfigured: {0}")]
    Configuration(String),
}

/// The completion capability the screening workflow needs: prompt in, text out.
///
/// Carried by the orchestrator as `Arc<dyn CompletionService>`.
#[async_trait]
pub trait CompletionService: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError>;
}

/// Which provider API the client speaks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    #[default]
    OpenAi,
    Anthropic,
}

impl LlmProvider {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "openai" => Some(Self::OpenAi),
            "anthropic" => Some(Self::Anthropic),
            _ => None,
        }
    }

    pub fn default_model(self) -> &'static str {
        match self {
            Self::OpenAi => OPENAI_DEFAULT_MODEL,
            Self::Anthropic => ANTHROPIC_DEFAULT_MODEL,
        }
    }

    fn default_base_url(self) -> &'static str {
        match self {
            Self::OpenAi => OPENAI_BASE_URL,
            Self::Anthropic => ANTHROPIC_BASE_URL,
        }
    }

    fn endpoint_path(self) -> &'static str {
        match self {
            Self::OpenAi => "/v1/chat/completions",
            Self::Anthropic => "/v1/messages",
        }
    }
}

/// Settings for a single `LlmClient`.
#[derive(Debug, Clone)]
pub struct LlmSettings {
    pub provider: LlmProvider,
    pub api_key: String,
    pub model: String,
    pub base_url: Option<String>,
    pub timeout: Duration,
    /// Total attempts per call, including the first. 1 disables retries.
    pub max_attempts: u32,
}

/// HTTP-backed completion client.
/// Retries on 429 (rate limit), 5xx and transport errors with exponential backoff.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    provider: LlmProvider,
    api_key: String,
    model: String,
    endpoint: String,
    max_attempts: u32,
}

impl std::fmt::Debug for LlmClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmClient")
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl LlmClient {
    pub fn new(settings: LlmSettings) -> Result<Self, LlmError> {
        if settings.api_key.trim().is_empty() {
            return Err(LlmError::Configuration("API key is empty".to_string()));
        }
        if settings.max_attempts == 0 {
            return Err(LlmError::Configuration(
                "max_attempts must be at least 1".to_string(),
            ));
        }

        let client = Client::builder().timeout(settings.timeout).build()?;
        let base = settings
            .base_url
            .as_deref()
            .unwrap_or(settings.provider.default_base_url())
            .trim_end_matches('/');

        Ok(Self {
            client,
            provider: settings.provider,
            api_key: settings.api_key,
            model: settings.model,
            endpoint: format!("{base}{}", settings.provider.endpoint_path()),
            max_attempts: settings.max_attempts,
        })
    }

    pub fn provider(&self) -> LlmProvider {
        self.provider
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn build_request(&self, prompt: &str) -> reqwest::RequestBuilder {
        let messages = vec![ChatMessage {
            role: "user",
            content: prompt,
        }];

        match self.provider {
            LlmProvider::OpenAi => self
                .client
                .post(&self.endpoint)
                .bearer_auth(&self.api_key)
                .json(&OpenAiRequest {
                    model: &self.model,
                    messages,
                }),
            LlmProvider::Anthropic => self
                .client
                .post(&self.endpoint)
                .header("x-api-key", &self.api_key)
                .header("anthropic-version", ANTHROPIC_VERSION)
                .json(&AnthropicRequest {
                    model: &self.model,
                    max_tokens: MAX_TOKENS,
                    messages,
                }),
        }
    }

    /// Makes a single completion call, returning the provider's text verbatim.
    pub async fn call(&self, prompt: &str) -> Result<String, LlmError> {
        let mut last_error: Option<LlmError> = None;

        for attempt in 0..self.max_attempts {
            if attempt > 0 {
                // Exponential backoff: 1s, 2s, 4s
                let delay = backoff_delay(attempt);
                warn!(
                    "LLM call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = match self.build_request(prompt).send().await {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(LlmError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("LLM API returned {}: {}", status, body);
                last_error = Some(LlmError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(LlmError::Api {
                    status: status.as_u16(),
                    message: extract_error_message(self.provider, body),
                });
            }

            let body = response.text().await?;
            let text = extract_completion_text(self.provider, &body)?;
            debug!(
                provider = ?self.provider,
                model = %self.model,
                chars = text.len(),
                "LLM call succeeded"
            );
            return Ok(text);
        }

        Err(last_error.unwrap_or(LlmError::RateLimited {
            retries: self.max_attempts,
        }))
    }
}

#[async_trait]
impl CompletionService for LlmClient {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        self.call(prompt).await
    }
}

fn backoff_delay(attempt: u32) -> Duration {
    Duration::from_millis(1000 * (1 << (attempt - 1).min(10)))
}

/// Pulls the completion text out of a provider response body.
fn extract_completion_text(provider: LlmProvider, body: &str) -> Result<String, LlmError> {
    let text = match provider {
        LlmProvider::OpenAi => serde_json::from_str::<ChatCompletionResponse>(body)?.into_text(),
        LlmProvider::Anthropic => serde_json::from_str::<MessagesResponse>(body)?.into_text(),
    };
    text.ok_or(LlmError::EmptyContent)
}

/// Best-effort extraction of the provider's error message; falls back to the raw body.
fn extract_error_message(provider: LlmProvider, body: String) -> String {
    let parsed = match provider {
        LlmProvider::OpenAi => serde_json::from_str::<OpenAiError>(&body).map(|e| e.error.message),
        LlmProvider::Anthropic => {
            serde_json::from_str::<AnthropicError>(&body).map(|e| e.error.message)
        }
    };
    parsed.unwrap_or(body)
}

//! LLM Client: the single point of entry for all provider API calls.
//!
//! ARCHITECTURAL RULE: No other module may call the OpenAI or Anthropic APIs directly.
//! All LLM interactions MUST go through a `PromptSender` resolved from `ProviderRegistry`.
//!
//! One request per call: no retries, no backoff, no streaming. Failures are
//! returned to the caller immediately.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;

use crate::config::Config;
use crate::errors::AppError;

pub mod anthropic;
pub mod openai;
pub mod prompts;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

/// Which remote language-model API a request is routed to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    #[default]
    OpenAi,
    Anthropic,
}

impl Provider {
    pub const ALL: [Provider; 2] = [Provider::OpenAi, Provider::Anthropic];

    /// Environment variable holding this provider's API key.
    pub fn api_key_env(&self) -> &'static str {
        match self {
            Provider::OpenAi => "OPENAI_API_KEY",
            Provider::Anthropic => "ANTHROPIC_API_KEY",
        }
    }

    pub fn model(&self) -> &'static str {
        match self {
            Provider::OpenAi => openai::MODEL,
            Provider::Anthropic => anthropic::MODEL,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Provider::OpenAi => "OpenAI",
            Provider::Anthropic => "Anthropic",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Everything a provider needs to turn a prompt into text.
/// Identical for both providers; only the wire envelope differs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompletionRequest<'a> {
    pub system: &'a str,
    pub prompt: &'a str,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// The send-a-prompt capability, implemented once per provider.
///
/// Carried in `ProviderRegistry` as `Arc<dyn PromptSender>` so tests can swap in a stub.
#[async_trait]
pub trait PromptSender: Send + Sync {
    fn provider(&self) -> Provider;

    /// Sends one request and returns the model's text without modification.
    async fn send_prompt(&self, request: &CompletionRequest<'_>) -> Result<String, LlmError>;
}

/// The configured senders, at most one per provider.
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    openai: Option<Arc<dyn PromptSender>>,
    anthropic: Option<Arc<dyn PromptSender>>,
}

impl ProviderRegistry {
    /// Builds a sender for every provider whose API key is present.
    pub fn from_config(config: &Config) -> Result<Self, LlmError> {
        let mut registry = Self::default();
        if let Some(key) = &config.openai_api_key {
            registry = registry.with_sender(Arc::new(openai::OpenAiClient::new(key.clone())?));
        }
        if let Some(key) = &config.anthropic_api_key {
            registry =
                registry.with_sender(Arc::new(anthropic::AnthropicClient::new(key.clone())?));
        }
        Ok(registry)
    }

    pub fn with_sender(mut self, sender: Arc<dyn PromptSender>) -> Self {
        match sender.provider() {
            Provider::OpenAi => self.openai = Some(sender),
            Provider::Anthropic => self.anthropic = Some(sender),
        }
        self
    }

    pub fn is_configured(&self, provider: Provider) -> bool {
        self.slot(provider).is_some()
    }

    /// Returns the sender for `provider`, or a config error naming the missing key.
    pub fn resolve(&self, provider: Provider) -> Result<Arc<dyn PromptSender>, AppError> {
        self.slot(provider).cloned().ok_or_else(|| {
            AppError::Config(format!(
                "{provider} is not configured: set {} in the environment or .env file",
                provider.api_key_env()
            ))
        })
    }

    fn slot(&self, provider: Provider) -> Option<&Arc<dyn PromptSender>> {
        match provider {
            Provider::OpenAi => self.openai.as_ref(),
            Provider::Anthropic => self.anthropic.as_ref(),
        }
    }
}

/// Error body shape shared by both providers: `{"error": {"message": ...}}`.
#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

pub(crate) fn http_client() -> Result<Client, LlmError> {
    Ok(Client::builder().timeout(REQUEST_TIMEOUT).build()?)
}

/// Turns a non-2xx status into `LlmError::Api` and a 2xx body into `T`.
pub(crate) async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, LlmError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(api_error(status.as_u16(), body));
    }

    serde_json::from_str(&body).map_err(|e| LlmError::MalformedResponse(e.to_string()))
}

fn api_error(status: u16, body: String) -> LlmError {
    let message = serde_json::from_str::<ApiErrorEnvelope>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body);
    LlmError::Api { status, message }
}

//! Anthropic Messages API implementation of `PromptSender`.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{http_client, read_json, CompletionRequest, LlmError, PromptSender, Provider};

const ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com/v1";
const ANTHROPIC_VERSION: &str = "2023-06-01";
/// Hardcoded to keep output comparable across runs.
pub const MODEL: &str = "claude-sonnet-4-20250514";

#[derive(Debug, Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    system: &'a str,
    messages: Vec<AnthropicMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct AnthropicMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    content: Vec<ContentBlock>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    input_tokens: u32,
    output_tokens: u32,
}

impl AnthropicResponse {
    /// Concatenates every text block. No text blocks yields the empty string.
    fn into_text(self) -> String {
        self.content
            .into_iter()
            .filter(|b| b.block_type == "text")
            .filter_map(|b| b.text)
            .collect()
    }
}

fn build_request<'a>(request: &CompletionRequest<'a>) -> AnthropicRequest<'a> {
    AnthropicRequest {
        model: MODEL,
        max_tokens: request.max_tokens,
        temperature: request.temperature,
        system: request.system,
        messages: vec![AnthropicMessage {
            role: "user",
            content: request.prompt,
        }],
    }
}

#[derive(Clone)]
pub struct AnthropicClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl AnthropicClient {
    pub fn new(api_key: String) -> Result<Self, LlmError> {
        Self::with_base_url(api_key, ANTHROPIC_BASE_URL)
    }

    pub fn with_base_url(api_key: String, base_url: impl Into<String>) -> Result<Self, LlmError> {
        Ok(Self {
            client: http_client()?,
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl PromptSender for AnthropicClient {
    fn provider(&self) -> Provider {
        Provider::Anthropic
    }

    async fn send_prompt(&self, request: &CompletionRequest<'_>) -> Result<String, LlmError> {
        let response = self
            .client
            .post(format!("{}/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&build_request(request))
            .send()
            .await?;

        let message: AnthropicResponse = read_json(response).await?;

        if let Some(usage) = &message.usage {
            debug!(
                "Anthropic call succeeded: input_tokens={}, output_tokens={}",
                usage.input_tokens, usage.output_tokens
            );
        }

        Ok(message.into_text())
    }
}

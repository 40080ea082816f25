//! OpenAI Chat Completions implementation of `PromptSender`.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{http_client, read_json, CompletionRequest, LlmError, PromptSender, Provider};

const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
/// Hardcoded to keep output comparable across runs.
pub const MODEL: &str = "gpt-4o-mini";

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

impl ChatCompletionResponse {
    /// Text of the first choice. A null `content` is the empty string.
    fn into_text(self) -> Result<String, LlmError> {
        self.choices
            .into_iter()
            .next()
            .map(|c| c.message.content.unwrap_or_default())
            .ok_or_else(|| LlmError::MalformedResponse("response has no choices".to_string()))
    }
}

fn build_request<'a>(request: &CompletionRequest<'a>) -> ChatCompletionRequest<'a> {
    ChatCompletionRequest {
        model: MODEL,
        messages: vec![
            ChatMessage {
                role: "system",
                content: request.system,
            },
            ChatMessage {
                role: "user",
                content: request.prompt,
            },
        ],
        max_tokens: request.max_tokens,
        temperature: request.temperature,
    }
}

#[derive(Clone)]
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl OpenAiClient {
    pub fn new(api_key: String) -> Result<Self, LlmError> {
        Self::with_base_url(api_key, OPENAI_BASE_URL)
    }

    /// Points the client at another OpenAI-compatible host, e.g. a local test server.
    pub fn with_base_url(api_key: String, base_url: impl Into<String>) -> Result<Self, LlmError> {
        Ok(Self {
            client: http_client()?,
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl PromptSender for OpenAiClient {
    fn provider(&self) -> Provider {
        Provider::OpenAi
    }

    async fn send_prompt(&self, request: &CompletionRequest<'_>) -> Result<String, LlmError> {
        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&build_request(request))
            .send()
            .await?;

        let completion: ChatCompletionResponse = read_json(response).await?;

        if let Some(usage) = &completion.usage {
            debug!(
                "OpenAI call succeeded: prompt_tokens={}, completion_tokens={}",
                usage.prompt_tokens, usage.completion_tokens
            );
        }

        completion.into_text()
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        http::{HeaderMap, StatusCode},
        routing::post,
        Json, Router,
    };
    use serde_json::{json, Value};

    use super::*;
    use crate::llm_client::testing::{serve, unreachable_url};

    fn sample_request() -> CompletionRequest<'static> {
        CompletionRequest {
            system: "You are a career coach.",
            prompt: "Polish this resume",
            max_tokens: 800,
            temperature: 0.7,
        }
    }

    #[test]
    fn test_request_body_has_system_then_user_message() {
        let body = serde_json::to_value(build_request(&sample_request())).unwrap();
        assert_eq!(body["model"], "gpt-4o-mini");
        assert_eq!(
            body["messages"],
            json!([
                {"role": "system", "content": "You are a career coach."},
                {"role": "user", "content": "Polish this resume"}
            ])
        );
        assert_eq!(body["max_tokens"], 800);
        assert!((body["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_response_text_is_first_choice_verbatim() {
        let body = r#"{
            "id": "chatcmpl-1",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "  OK\n"}, "finish_reason": "stop"},
                {"index": 1, "message": {"role": "assistant", "content": "ignored"}, "finish_reason": "stop"}
            ],
            "usage": {"prompt_tokens": 12, "completion_tokens": 1, "total_tokens": 13}
        }"#;
        let parsed: ChatCompletionResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.into_text().unwrap(), "  OK\n");
    }

    #[test]
    fn test_null_content_is_empty_text() {
        let body = r#"{"choices": [{"message": {"role": "assistant", "content": null}}]}"#;
        let parsed: ChatCompletionResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.into_text().unwrap(), "");
    }

    #[test]
    fn test_no_choices_is_malformed() {
        let parsed: ChatCompletionResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        assert!(matches!(
            parsed.into_text(),
            Err(LlmError::MalformedResponse(_))
        ));
    }

    /// Fake chat-completions endpoint; the bearer token picks the scenario.
    async fn fake_chat_completions(
        headers: HeaderMap,
        Json(body): Json<Value>,
    ) -> (StatusCode, Json<Value>) {
        let auth = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();

        match auth {
            "Bearer sk-ok" => {
                if headers.contains_key("x-api-key")
                    || body["model"] != MODEL
                    || body["messages"][0]["role"] != "system"
                    || body["messages"][1]["content"] != "Polish this resume"
                    || body["max_tokens"] != 800
                {
                    return (
                        StatusCode::BAD_REQUEST,
                        Json(json!({"error": {"message": format!("unexpected request: {body}")}})),
                    );
                }
                (
                    StatusCode::OK,
                    Json(json!({
                        "choices": [{"message": {"role": "assistant", "content": "Polished"}}],
                        "usage": {"prompt_tokens": 10, "completion_tokens": 2}
                    })),
                )
            }
            "Bearer sk-revoked" => (
                StatusCode::UNAUTHORIZED,
                Json(json!({"error": {"message": "Incorrect API key provided"}})),
            ),
            "Bearer sk-odd" => (StatusCode::OK, Json(json!({"foo": 1}))),
            _ => (
                StatusCode::BAD_REQUEST,
                Json(json!({"error": {"message": "missing bearer auth"}})),
            ),
        }
    }

    async fn fake_openai() -> String {
        serve(Router::new().route("/chat/completions", post(fake_chat_completions))).await
    }

    #[tokio::test]
    async fn test_send_prompt_uses_bearer_auth_and_returns_text() {
        let client = OpenAiClient::with_base_url("sk-ok".to_string(), fake_openai().await).unwrap();
        let text = client.send_prompt(&sample_request()).await.unwrap();
        assert_eq!(text, "Polished");
    }

    #[tokio::test]
    async fn test_send_prompt_non_2xx_is_api_error() {
        let client =
            OpenAiClient::with_base_url("sk-revoked".to_string(), fake_openai().await).unwrap();
        match client.send_prompt(&sample_request()).await {
            Err(LlmError::Api { status, message }) => {
                assert_eq!(status, 401);
                assert_eq!(message, "Incorrect API key provided");
            }
            other => panic!("expected API error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_send_prompt_unexpected_body_is_malformed() {
        let client = OpenAiClient::with_base_url("sk-odd".to_string(), fake_openai().await).unwrap();
        assert!(matches!(
            client.send_prompt(&sample_request()).await,
            Err(LlmError::MalformedResponse(_))
        ));
    }

    #[tokio::test]
    async fn test_send_prompt_connection_failure_is_http_error() {
        let client = OpenAiClient::with_base_url("sk-ok".to_string(), unreachable_url().await).unwrap();
        assert!(matches!(
            client.send_prompt(&sample_request()).await,
            Err(LlmError::Http(_))
        ));
    }
}

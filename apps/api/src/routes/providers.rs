//! Provider setup diagnostics: which keys are loaded, and whether a provider answers.

use axum::{extract::State, Json};
use serde::Serialize;
use tracing::{info, warn};

use crate::config::mask_key;
use crate::errors::AppError;
use crate::extract::AppPath;
use crate::llm_client::prompts::{
    CAREER_ASSISTANT_SYSTEM, DEFAULT_TEMPERATURE, PING_MAX_TOKENS, PING_PROMPT,
};
use crate::llm_client::{CompletionRequest, Provider};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ProviderStatus {
    pub provider: Provider,
    pub configured: bool,
    pub api_key_env: &'static str,
    /// First 10 and last 4 characters of the key; never the full key.
    pub key_preview: Option<String>,
    pub model: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ProvidersResponse {
    pub providers: Vec<ProviderStatus>,
}

#[derive(Debug, Serialize)]
pub struct ProviderCheckResponse {
    pub provider: Provider,
    pub model: &'static str,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// GET /api/v1/providers
pub async fn handle_list_providers(State(state): State<AppState>) -> Json<ProvidersResponse> {
    let providers = Provider::ALL
        .iter()
        .map(|&provider| {
            let key = match provider {
                Provider::OpenAi => state.config.openai_api_key.as_deref(),
                Provider::Anthropic => state.config.anthropic_api_key.as_deref(),
            };
            ProviderStatus {
                provider,
                configured: state.llm.is_configured(provider),
                api_key_env: provider.api_key_env(),
                key_preview: key.map(mask_key),
                model: provider.model(),
            }
        })
        .collect();

    Json(ProvidersResponse { providers })
}

/// POST /api/v1/providers/:provider/check
///
/// Sends a tiny prompt to confirm the key and network path work.
/// A provider failure is reported in the body, not as an HTTP error.
pub async fn handle_check_provider(
    State(state): State<AppState>,
    AppPath(provider): AppPath<Provider>,
) -> Result<Json<ProviderCheckResponse>, AppError> {
    let sender = state.llm.resolve(provider)?;

    let request = CompletionRequest {
        system: CAREER_ASSISTANT_SYSTEM,
        prompt: PING_PROMPT,
        max_tokens: PING_MAX_TOKENS,
        temperature: DEFAULT_TEMPERATURE,
    };

    let error = match sender.send_prompt(&request).await {
        Ok(_) => {
            info!("{provider} connectivity check succeeded");
            None
        }
        Err(e) => {
            warn!("{provider} connectivity check failed: {e}");
            Some(e.to_string())
        }
    };

    Ok(Json(ProviderCheckResponse {
        provider,
        model: provider.model(),
        ok: error.is_none(),
        error,
    }))
}

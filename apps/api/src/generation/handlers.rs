//! Axum route handlers for the Generation API.

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info_span, Instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::extract::AppJson;
use crate::generation::dispatcher::{
    generate_career_advice, generate_cover_letter, polish_resume, TaskKind,
};
use crate::llm_client::Provider;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

// Text fields are optional at the JSON level so that an omitted field surfaces
// as a VALIDATION_ERROR naming it, not as an extractor rejection.

#[derive(Debug, Deserialize)]
pub struct PolishResumeRequest {
    #[serde(default)]
    pub provider: Provider,
    pub position_name: Option<String>,
    pub resume_content: Option<String>,
    pub polish_instructions: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CoverLetterRequest {
    #[serde(default)]
    pub provider: Provider,
    pub company_name: Option<String>,
    pub position_name: Option<String>,
    pub job_description: Option<String>,
    pub resume_content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CareerAdviceRequest {
    #[serde(default)]
    pub provider: Provider,
    pub position_name: Option<String>,
    pub job_description: Option<String>,
    pub resume_content: Option<String>,
}

/// `text` is the provider's response, unmodified.
#[derive(Debug, Serialize)]
pub struct TaskResponse {
    pub request_id: Uuid,
    pub task: TaskKind,
    pub provider: Provider,
    pub model: String,
    pub text: String,
    pub generated_at: DateTime<Utc>,
}

impl TaskResponse {
    fn new(request_id: Uuid, task: TaskKind, provider: Provider, text: String) -> Self {
        Self {
            request_id,
            task,
            provider,
            model: provider.model().to_string(),
            text,
            generated_at: Utc::now(),
        }
    }
}

/// Span carrying the request id, so dispatcher and client logs can be correlated.
fn task_span(request_id: Uuid, provider: Provider) -> tracing::Span {
    info_span!("task", %request_id, %provider)
}

fn text(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or_default()
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/resume/polish
pub async fn handle_polish_resume(
    State(state): State<AppState>,
    AppJson(request): AppJson<PolishResumeRequest>,
) -> Result<Json<TaskResponse>, AppError> {
    let request_id = Uuid::new_v4();

    let output = polish_resume(
        &state.llm,
        request.provider,
        text(&request.position_name),
        text(&request.resume_content),
        request.polish_instructions.as_deref(),
    )
    .instrument(task_span(request_id, request.provider))
    .await?;

    Ok(Json(TaskResponse::new(
        request_id,
        TaskKind::ResumePolish,
        request.provider,
        output,
    )))
}

/// POST /api/v1/cover-letter
pub async fn handle_cover_letter(
    State(state): State<AppState>,
    AppJson(request): AppJson<CoverLetterRequest>,
) -> Result<Json<TaskResponse>, AppError> {
    let request_id = Uuid::new_v4();

    let output = generate_cover_letter(
        &state.llm,
        request.provider,
        text(&request.company_name),
        text(&request.position_name),
        text(&request.job_description),
        request.resume_content.as_deref(),
    )
    .instrument(task_span(request_id, request.provider))
    .await?;

    Ok(Json(TaskResponse::new(
        request_id,
        TaskKind::CoverLetter,
        request.provider,
        output,
    )))
}

/// POST /api/v1/career-advice
pub async fn handle_career_advice(
    State(state): State<AppState>,
    AppJson(request): AppJson<CareerAdviceRequest>,
) -> Result<Json<TaskResponse>, AppError> {
    let request_id = Uuid::new_v4();

    let output = generate_career_advice(
        &state.llm,
        request.provider,
        text(&request.position_name),
        text(&request.job_description),
        request.resume_content.as_deref(),
    )
    .instrument(task_span(request_id, request.provider))
    .await?;

    Ok(Json(TaskResponse::new(
        request_id,
        TaskKind::CareerAdvice,
        request.provider,
        output,
    )))
}

//! Prompt Dispatcher: turns a task request into one provider call.
//!
//! Pipeline: validate required fields → resolve provider sender → build prompt → send once.
//! Validation and provider resolution both happen before any network I/O.
//! The provider's text is returned exactly as received.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::errors::AppError;
use crate::generation::prompts::{
    CAREER_ADVICE_TEMPLATE, CAREER_ADVICE_WITH_RESUME_TEMPLATE, COVER_LETTER_TEMPLATE,
    COVER_LETTER_WITH_RESUME_TEMPLATE, RESUME_POLISH_INSTRUCTED_TEMPLATE,
    RESUME_POLISH_TEMPLATE,
};
use crate::generation::template::render;
use crate::llm_client::prompts::{CAREER_ASSISTANT_SYSTEM, DEFAULT_TEMPERATURE};
use crate::llm_client::{CompletionRequest, Provider, ProviderRegistry};

pub const POSITION_NAME: &str = "position_name";
pub const RESUME_CONTENT: &str = "resume_content";
pub const COMPANY_NAME: &str = "company_name";
pub const JOB_DESCRIPTION: &str = "job_description";
pub const POLISH_INSTRUCTIONS: &str = "polish_instructions";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    ResumePolish,
    CoverLetter,
    CareerAdvice,
}

impl TaskKind {
    pub fn required_fields(&self) -> &'static [&'static str] {
        match self {
            TaskKind::ResumePolish => &[POSITION_NAME, RESUME_CONTENT],
            TaskKind::CoverLetter => &[COMPANY_NAME, POSITION_NAME, JOB_DESCRIPTION],
            TaskKind::CareerAdvice => &[POSITION_NAME, JOB_DESCRIPTION],
        }
    }

    pub fn max_tokens(&self) -> u32 {
        match self {
            TaskKind::ResumePolish | TaskKind::CoverLetter => 800,
            TaskKind::CareerAdvice => 1024,
        }
    }
}

/// What to generate, with which provider, from which field values.
#[derive(Debug, Clone)]
pub struct TaskRequest {
    pub kind: TaskKind,
    pub provider: Provider,
    pub fields: BTreeMap<String, String>,
}

impl TaskRequest {
    pub fn new(kind: TaskKind, provider: Provider) -> Self {
        Self {
            kind,
            provider,
            fields: BTreeMap::new(),
        }
    }

    pub fn with_field(mut self, name: &str, value: impl Into<String>) -> Self {
        self.fields.insert(name.to_string(), value.into());
        self
    }

    pub fn with_optional_field(self, name: &str, value: Option<&str>) -> Self {
        match value {
            Some(v) => self.with_field(name, v),
            None => self,
        }
    }

    /// Returns the raw value of a field that has non-whitespace content.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .map(String::as_str)
            .filter(|v| !v.trim().is_empty())
    }
}

/// Builds the prompt for `request`, failing with a validation error if a required field is blank.
pub fn build_prompt(request: &TaskRequest) -> Result<String, AppError> {
    let missing: Vec<&str> = request
        .kind
        .required_fields()
        .iter()
        .copied()
        .filter(|name| request.field(name).is_none())
        .collect();

    if !missing.is_empty() {
        return Err(AppError::Validation(format!(
            "missing required field(s): {}",
            missing.join(", ")
        )));
    }

    let template = match request.kind {
        TaskKind::ResumePolish if request.field(POLISH_INSTRUCTIONS).is_some() => {
            RESUME_POLISH_INSTRUCTED_TEMPLATE
        }
        TaskKind::ResumePolish => RESUME_POLISH_TEMPLATE,
        TaskKind::CoverLetter if request.field(RESUME_CONTENT).is_some() => {
            COVER_LETTER_WITH_RESUME_TEMPLATE
        }
        TaskKind::CoverLetter => COVER_LETTER_TEMPLATE,
        TaskKind::CareerAdvice if request.field(RESUME_CONTENT).is_some() => {
            CAREER_ADVICE_WITH_RESUME_TEMPLATE
        }
        TaskKind::CareerAdvice => CAREER_ADVICE_TEMPLATE,
    };

    let values: Vec<(&str, &str)> = request
        .fields
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect();

    Ok(render(template, &values))
}

/// Runs one task end to end and returns the provider's text unmodified.
pub async fn run_task(llm: &ProviderRegistry, request: &TaskRequest) -> Result<String, AppError> {
    let prompt = build_prompt(request)?;
    let sender = llm.resolve(request.provider)?;

    info!(
        "Dispatching {:?} to {} ({})",
        request.kind,
        request.provider,
        request.provider.model()
    );
    debug!("Prompt length: {} bytes", prompt.len());

    let completion = CompletionRequest {
        system: CAREER_ASSISTANT_SYSTEM,
        prompt: &prompt,
        max_tokens: request.kind.max_tokens(),
        temperature: DEFAULT_TEMPERATURE,
    };

    let text = sender.send_prompt(&completion).await.map_err(|e| {
        warn!("{} call for {:?} failed: {e}", request.provider, request.kind);
        AppError::Provider(e)
    })?;

    if text.is_empty() {
        warn!("{} returned empty text for {:?}", request.provider, request.kind);
    }

    Ok(text)
}

/// Rewrites resume content for a target position.
pub async fn polish_resume(
    llm: &ProviderRegistry,
    provider: Provider,
    position_name: &str,
    resume_content: &str,
    polish_instructions: Option<&str>,
) -> Result<String, AppError> {
    let request = TaskRequest::new(TaskKind::ResumePolish, provider)
        .with_field(POSITION_NAME, position_name)
        .with_field(RESUME_CONTENT, resume_content)
        .with_optional_field(POLISH_INSTRUCTIONS, polish_instructions);
    run_task(llm, &request).await
}

/// Drafts a cover letter for a company and position.
pub async fn generate_cover_letter(
    llm: &ProviderRegistry,
    provider: Provider,
    company_name: &str,
    position_name: &str,
    job_description: &str,
    resume_content: Option<&str>,
) -> Result<String, AppError> {
    let request = TaskRequest::new(TaskKind::CoverLetter, provider)
        .with_field(COMPANY_NAME, company_name)
        .with_field(POSITION_NAME, position_name)
        .with_field(JOB_DESCRIPTION, job_description)
        .with_optional_field(RESUME_CONTENT, resume_content);
    run_task(llm, &request).await
}

/// Advises on how to position a candidate for the role applied to.
pub async fn generate_career_advice(
    llm: &ProviderRegistry,
    provider: Provider,
    position_applied: &str,
    job_description: &str,
    resume_content: Option<&str>,
) -> Result<String, AppError> {
    let request = TaskRequest::new(TaskKind::CareerAdvice, provider)
        .with_field(POSITION_NAME, position_applied)
        .with_field(JOB_DESCRIPTION, job_description)
        .with_optional_field(RESUME_CONTENT, resume_content);
    run_task(llm, &request).await
}

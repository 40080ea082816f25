pub mod health;
pub mod providers;

use axum::{
    routing::{get, post},
    Router,
};

use crate::generation::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Generation API
        .route("/api/v1/resume/polish", post(handlers::handle_polish_resume))
        .route("/api/v1/cover-letter", post(handlers::handle_cover_letter))
        .route("/api/v1/career-advice", post(handlers::handle_career_advice))
        // Provider diagnostics
        .route("/api/v1/providers", get(providers::handle_list_providers))
        .route(
            "/api/v1/providers/:provider/check",
            post(providers::handle_check_provider),
        )
        .with_state(state)
}

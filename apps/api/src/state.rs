use crate::config::Config;
use crate::llm_client::ProviderRegistry;

/// Shared application state injected into all route handlers via Axum extractors.
/// Immutable after startup.
#[derive(Clone)]
pub struct AppState {
    pub llm: ProviderRegistry,
    pub config: Config,
}

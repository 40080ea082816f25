// Cross-cutting prompt fragments shared by every provider call.
// Task templates live in generation::prompts.

/// System instruction sent with every task, identical for both providers.
pub const CAREER_ASSISTANT_SYSTEM: &str = "You are an experienced career coach and \
    professional resume writer. You help job seekers present their real experience \
    clearly and persuasively for a specific role. Never invent qualifications, \
    employers, or achievements that the user did not provide.";

/// Minimal prompt used by the provider connectivity check.
pub const PING_PROMPT: &str = "Hi";

/// Output budget for the connectivity check.
pub const PING_MAX_TOKENS: u32 = 5;

/// Temperature for every completion.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

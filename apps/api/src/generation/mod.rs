// Text generation: resume polish, cover letters, career advice.
// All provider calls go through llm_client, never direct HTTP calls here.

pub mod dispatcher;
pub mod handlers;
pub mod prompts;
pub mod template;

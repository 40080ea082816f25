use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Provider keys are optional: a missing key only fails calls routed to that provider.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: Option<String>,
    pub anthropic_api_key: Option<String>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            openai_api_key: optional_env("OPENAI_API_KEY"),
            anthropic_api_key: optional_env("ANTHROPIC_API_KEY"),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "7860".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

/// Blank values count as unset.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Masks an API key for display: first 10 chars, `...`, last 4.
/// Short keys are fully hidden.
pub fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 14 {
        return "***".to_string();
    }
    let head: String = chars[..10].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_key_keeps_head_and_tail() {
        assert_eq!(mask_key("sk-proj-abcdefghijklmnop1234"), "sk-proj-ab...1234");
    }

    #[test]
    fn test_mask_key_hides_short_keys() {
        assert_eq!(mask_key("sk-short"), "***");
        assert_eq!(mask_key("12345678901234"), "***");
    }

    #[test]
    fn test_mask_key_counts_chars_not_bytes() {
        let key = "ééééééééééééééé";
        assert_eq!(mask_key(key), "éééééééééé...éééé");
    }

    #[test]
    fn test_optional_env_treats_blank_as_unset_and_trims() {
        let key = "CAREER_API_TEST_OPTIONAL_KEY";

        std::env::set_var(key, "   ");
        assert_eq!(optional_env(key), None);

        std::env::set_var(key, " sk-x ");
        assert_eq!(optional_env(key), Some("sk-x".to_string()));

        std::env::remove_var(key);
        assert_eq!(optional_env(key), None);
    }

    #[test]
    fn test_from_env_rejects_invalid_port() {
        std::env::set_var("PORT", "notaport");
        let result = Config::from_env();
        std::env::remove_var("PORT");

        let err = result.unwrap_err();
        assert_eq!(err.to_string(), "PORT must be a valid port number");
    }
}

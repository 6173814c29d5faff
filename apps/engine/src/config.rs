use anyhow::{Context, Result};

/// Configuration loaded from environment variables; `.env` is honored when
/// present. Only the rewrite collaborator needs credentials, so this stays
/// small.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: String,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_required_variable_reports_its_name() {
        std::env::remove_var("ANTHROPIC_API_KEY");
        let err = require_env("ANTHROPIC_API_KEY").unwrap_err();
        assert!(err.to_string().contains("ANTHROPIC_API_KEY"));
    }
}

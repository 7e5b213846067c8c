use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use crate::expansion::expander::ExpansionMode;
use crate::llm_client::{DEFAULT_BASE_URL, DEFAULT_MODEL};

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub webhook_url: String,
    pub data_dir: PathBuf,
    pub port: u16,
    pub generation_timeout_secs: u64,
    pub expansion_mode: ExpansionMode,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key → value source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let require = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .with_context(|| format!("Required environment variable '{key}' is not set"))
        };
        let optional = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Ok(Config {
            gemini_api_key: require("GEMINI_API_KEY")?,
            gemini_model: optional("GEMINI_MODEL", DEFAULT_MODEL),
            gemini_base_url: optional("GEMINI_BASE_URL", DEFAULT_BASE_URL),
            webhook_url: require("WEBHOOK_URL")?,
            data_dir: PathBuf::from(optional("DATA_DIR", "data")),
            port: optional("PORT", "5000")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            generation_timeout_secs: optional("GENERATION_TIMEOUT_SECS", "120")
                .parse::<u64>()
                .context("GENERATION_TIMEOUT_SECS must be a whole number of seconds")?,
            expansion_mode: parse_expansion_mode(&optional("EXPANSION_MODE", "independent"))?,
            rust_log: optional("RUST_LOG", "info"),
        })
    }

    pub fn drafts_path(&self) -> PathBuf {
        self.data_dir.join("drafts").join("drafts.json")
    }

    pub fn posts_path(&self) -> PathBuf {
        self.data_dir.join("posts.json")
    }
}

fn parse_expansion_mode(raw: &str) -> Result<ExpansionMode> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "independent" => Ok(ExpansionMode::Independent),
        "conversational" => Ok(ExpansionMode::Conversational),
        other => bail!("EXPANSION_MODE must be 'independent' or 'conversational', got '{other}'"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    const REQUIRED: [(&str, &str); 2] = [
        ("GEMINI_API_KEY", "test-key"),
        ("WEBHOOK_URL", "https://hooks.example.com/catch/1"),
    ];

    #[test]
    fn test_defaults_apply() {
        let config = config_from(&REQUIRED).unwrap();
        assert_eq!(config.port, 5000);
        assert_eq!(config.gemini_model, "gemini-2.0-flash");
        assert_eq!(config.generation_timeout_secs, 120);
        assert_eq!(config.expansion_mode, ExpansionMode::Independent);
        assert_eq!(config.drafts_path(), PathBuf::from("data/drafts/drafts.json"));
        assert_eq!(config.posts_path(), PathBuf::from("data/posts.json"));
    }

    #[test]
    fn test_missing_required_names_the_variable() {
        let err = config_from(&[("GEMINI_API_KEY", "k")]).unwrap_err();
        assert!(err.to_string().contains("WEBHOOK_URL"));
    }

    #[test]
    fn test_blank_required_counts_as_missing() {
        let err = config_from(&[("GEMINI_API_KEY", "  "), ("WEBHOOK_URL", "u")]).unwrap_err();
        assert!(err.to_string().contains("GEMINI_API_KEY"));
    }

    #[test]
    fn test_overrides_are_read() {
        let mut pairs = REQUIRED.to_vec();
        pairs.extend([
            ("PORT", "8081"),
            ("DATA_DIR", "/var/lib/postcraft"),
            ("EXPANSION_MODE", "Conversational"),
            ("GENERATION_TIMEOUT_SECS", "15"),
        ]);
        let config = config_from(&pairs).unwrap();
        assert_eq!(config.port, 8081);
        assert_eq!(config.expansion_mode, ExpansionMode::Conversational);
        assert_eq!(config.generation_timeout_secs, 15);
        assert_eq!(
            config.posts_path(),
            PathBuf::from("/var/lib/postcraft/posts.json")
        );
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("PORT", "not-a-port"));
        assert!(config_from(&pairs).is_err());
    }

    #[test]
    fn test_unknown_expansion_mode_is_rejected() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("EXPANSION_MODE", "parallel"));
        let err = config_from(&pairs).unwrap_err();
        assert!(err.to_string().contains("parallel"));
    }
}

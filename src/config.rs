use std::path::PathBuf;
use std::time::Duration;

use eyre::Result;
use log::debug;
use serde::{Deserialize, Serialize};

pub const API_KEY_ENV: &str = "OPENROUTER_API_KEY";
pub const DEFAULT_API_URL: &str = "https://openrouter.ai/api/v1/chat/completions";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Caption languages tried before any other track, most preferred first
pub const DEFAULT_LANGUAGES: &[&str] = &["fr", "fr-FR", "en", "en-US", "es", "es-ES"];

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub api_key: Option<String>,
    pub api_url: Option<String>,
    pub default_model: Option<String>,
    pub timeout_secs: Option<u64>,
    pub languages: Option<Vec<String>>,
}

impl Config {
    /// Load config from ~/.config/ytsum/config.toml if it exists
    pub fn load() -> Result<Self> {
        let path = config_path();
        if path.exists() {
            debug!("Loading config from {}", path.display());
            let content = std::fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            debug!("No config file found at {}", path.display());
            Ok(Config::default())
        }
    }

    /// API key from the environment, falling back to the config file
    pub fn api_key(&self) -> Option<String> {
        std::env::var(API_KEY_ENV)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| self.api_key.clone())
    }

    pub fn api_url(&self) -> &str {
        self.api_url.as_deref().unwrap_or(DEFAULT_API_URL)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }

    pub fn languages(&self) -> Vec<String> {
        match &self.languages {
            Some(langs) if !langs.is_empty() => langs.clone(),
            _ => DEFAULT_LANGUAGES.iter().map(|l| l.to_string()).collect(),
        }
    }
}

pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from(".config"))
        .join("ytsum")
        .join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let toml_str = r#"
api_key = "sk-test"
api_url = "http://localhost:8080/v1/chat/completions"
default_model = "llama-3.1-70b"
timeout_secs = 30
languages = ["en", "de"]
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.api_url(), "http://localhost:8080/v1/chat/completions");
        assert_eq!(config.default_model.as_deref(), Some("llama-3.1-70b"));
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(config.languages(), vec!["en", "de"]);
    }

    #[test]
    fn test_parse_empty_config() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.api_key.is_none());
        assert_eq!(config.api_url(), DEFAULT_API_URL);
        assert_eq!(config.timeout(), Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert_eq!(config.languages(), DEFAULT_LANGUAGES);
    }

    #[test]
    fn test_parse_partial_config() {
        let toml_str = r#"default_model = "claude-3.5-sonnet""#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.default_model.as_deref(), Some("claude-3.5-sonnet"));
        assert!(config.timeout_secs.is_none());
    }

    #[test]
    fn test_empty_language_list_uses_defaults() {
        let config: Config = toml::from_str("languages = []").unwrap();
        assert_eq!(config.languages(), DEFAULT_LANGUAGES);
    }
}

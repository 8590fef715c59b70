use anyhow::{Context, Result};

use crate::llm_client::{DEFAULT_API_BASE, DEFAULT_MODEL};

/// Application configuration loaded from environment variables.
///
/// The Gemini key is deliberately not required here: a missing key surfaces as
/// a rejected upstream call, not as a startup failure.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub gemini_api_base: String,
    pub gemini_model: String,
    /// Ask the model for schema-constrained JSON instead of the free-text template.
    pub structured_output: bool,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. `from_env` is the only
    /// production caller; tests pass a map.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let or_default = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Ok(Config {
            gemini_api_key: lookup("GEMINI_API_KEY").unwrap_or_default(),
            gemini_api_base: or_default("GEMINI_API_BASE", DEFAULT_API_BASE)
                .trim_end_matches('/')
                .to_string(),
            gemini_model: or_default("GEMINI_MODEL", DEFAULT_MODEL),
            structured_output: parse_bool(&or_default("GEMINI_STRUCTURED_OUTPUT", "false"))
                .context("GEMINI_STRUCTURED_OUTPUT must be true or false")?,
            port: or_default("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: or_default("RUST_LOG", "info"),
        })
    }
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => anyhow::bail!("unrecognised boolean '{other}'"),
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

    #[test]
    fn test_defaults_when_nothing_is_set() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.gemini_api_key, "");
        assert_eq!(config.gemini_api_base, DEFAULT_API_BASE);
        assert_eq!(config.gemini_model, DEFAULT_MODEL);
        assert!(!config.structured_output);
        assert_eq!(config.port, 8080);
        assert_eq!(config.rust_log, "info");
    }

    #[test]
    fn test_overrides_are_applied_and_base_is_normalised() {
        let config = config_from(&[
            ("GEMINI_API_KEY", "secret"),
            ("GEMINI_API_BASE", "http://127.0.0.1:9999/"),
            ("GEMINI_MODEL", "gemini-1.5-pro"),
            ("GEMINI_STRUCTURED_OUTPUT", "TRUE"),
            ("PORT", "3000"),
        ])
        .unwrap();
        assert_eq!(config.gemini_api_key, "secret");
        assert_eq!(config.gemini_api_base, "http://127.0.0.1:9999");
        assert_eq!(config.gemini_model, "gemini-1.5-pro");
        assert!(config.structured_output);
        assert_eq!(config.port, 3000);
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        assert!(config_from(&[("PORT", "not-a-port")]).is_err());
    }

    #[test]
    fn test_invalid_boolean_is_rejected() {
        assert!(config_from(&[("GEMINI_STRUCTURED_OUTPUT", "maybe")]).is_err());
    }
}

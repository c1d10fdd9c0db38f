use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

pub const DEFAULT_REPLICATE_MODEL: &str = "black-forest-labs/flux-schnell";
pub const DEFAULT_REPLICATE_API_BASE: &str = "https://api.replicate.com/v1";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Missing token is reported per request, not at startup
    pub replicate_api_token: Option<String>,
    pub replicate_model: String,
    pub replicate_api_base: String,
    pub poll_interval_ms: u64,
    pub port: u16,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Config {
            replicate_api_token: env::var("REPLICATE_API_TOKEN")
                .ok()
                .filter(|token| !token.trim().is_empty()),
            replicate_model: env::var("REPLICATE_MODEL")
                .unwrap_or_else(|_| DEFAULT_REPLICATE_MODEL.to_string()),
            replicate_api_base: env::var("REPLICATE_API_BASE")
                .unwrap_or_else(|_| DEFAULT_REPLICATE_API_BASE.to_string()),
            poll_interval_ms: parse_var("REPLICATE_POLL_INTERVAL_MS", 500)?,
            port: parse_var("PORT", 3001)?,
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        })
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Token prefix safe to print in logs
    pub fn masked_token(&self) -> String {
        match &self.replicate_api_token {
            Some(token) => format!("{}...", token.chars().take(8).collect::<String>()),
            None => "NOT FOUND".to_string(),
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("{} has an invalid value '{}': {}", name, raw, e)),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    // Env vars are process-global, so everything touching them lives in one test.
    #[test]
    fn test_config_from_env() {
        env::remove_var("REPLICATE_API_TOKEN");
        env::remove_var("REPLICATE_MODEL");
        env::remove_var("REPLICATE_API_BASE");
        env::remove_var("REPLICATE_POLL_INTERVAL_MS");
        env::remove_var("PORT");
        env::remove_var("LOG_LEVEL");

        let config = Config::from_env().unwrap();
        assert!(config.replicate_api_token.is_none());
        assert_eq!(config.replicate_model, DEFAULT_REPLICATE_MODEL);
        assert_eq!(config.replicate_api_base, DEFAULT_REPLICATE_API_BASE);
        assert_eq!(config.poll_interval(), Duration::from_millis(500));
        assert_eq!(config.port, 3001);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.masked_token(), "NOT FOUND");

        env::set_var("REPLICATE_API_TOKEN", "r8_abcdefghijklmnop");
        env::set_var("PORT", "8080");
        let config = Config::from_env().unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.masked_token(), "r8_abcde...");

        env::set_var("REPLICATE_API_TOKEN", "   ");
        assert!(Config::from_env().unwrap().replicate_api_token.is_none());

        env::set_var("PORT", "not-a-port");
        assert!(Config::from_env().is_err());

        env::remove_var("REPLICATE_API_TOKEN");
        env::remove_var("PORT");
    }
}

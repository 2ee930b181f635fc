use std::env;
use thiserror::Error;

pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com";
pub const DEFAULT_WEATHER_BASE_URL: &str = "http://api.weatherapi.com/v1";

/// Process-wide configuration, resolved once at startup from the
/// environment. There is no configuration file surface.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub weather_api_key: String,
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub model: String,
    pub weather_base_url: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("required environment variable {0} is not set")]
    MissingVar(&'static str),
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            weather_api_key: require("WEATHER_API_KEY")?,
            openai_api_key: require("OPENAI_API_KEY")?,
            openai_base_url: optional("OPENAI_BASE_URL", DEFAULT_OPENAI_BASE_URL),
            model: optional("AGENT_MODEL", DEFAULT_MODEL),
            weather_base_url: optional("WEATHER_BASE_URL", DEFAULT_WEATHER_BASE_URL),
        })
    }
}

fn require(name: &'static str) -> Result<String, ConfigError> {
    env::var(name)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .ok_or(ConfigError::MissingVar(name))
}

fn optional(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

//! Environment-driven configuration.
//!
//! # Environment Variables
//!
//! - `BOT_TOKEN`: Telegram bot token (required)
//! - `OPENROUTER_API_KEY`: key for the chat-completion endpoint (required)
//! - `OPENROUTER_MODEL`: override the completion model id
//! - `OPENWEATHER_API_KEY`: enables the weather command when set and non-empty
//! - `PUBLIC_BASE_URL`: base address used when building artifact URLs
//! - `PORT`: HTTP front door port (default 8080)
//! - `OMNIBOT_DATA_DIR`: override the data directory (default `./data`)

use std::path::PathBuf;

use thiserror::Error;

/// Environment variable for the Telegram bot token.
pub const BOT_TOKEN_ENV: &str = "BOT_TOKEN";

/// Environment variable for the completion-API key.
pub const AI_API_KEY_ENV: &str = "OPENROUTER_API_KEY";

/// Environment variable for the completion model override.
pub const AI_MODEL_ENV: &str = "OPENROUTER_MODEL";

/// Environment variable for the weather-API key.
pub const WEATHER_API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

/// Environment variable for the public base URL.
pub const PUBLIC_BASE_URL_ENV: &str = "PUBLIC_BASE_URL";

/// Environment variable for the HTTP port.
pub const PORT_ENV: &str = "PORT";

/// Environment variable for a custom data directory.
pub const DATA_DIR_ENV: &str = "OMNIBOT_DATA_DIR";

/// Default completion model when `OPENROUTER_MODEL` is not set.
pub const DEFAULT_MODEL: &str = "openai/gpt-3.5-turbo";

/// Default HTTP front door port.
const DEFAULT_PORT: u16 = 8080;

/// Default data directory, relative to the working directory.
const DEFAULT_DATA_DIR: &str = "data";

const UPLOADS_SUBDIR: &str = "uploads";
const NOTES_FILE: &str = "notes.json";

/// Errors raised while building the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A mandatory environment variable is missing or empty.
    #[error("required environment variable {0} is not set")]
    MissingVar(&'static str),

    /// A variable is present but cannot be parsed.
    #[error("invalid value for {var}: {value}")]
    InvalidVar { var: &'static str, value: String },
}

/// Immutable process configuration, read from the environment exactly once
/// and passed by reference into every component at construction.
#[derive(Debug, Clone)]
pub struct Config {
    /// Telegram bot token.
    pub bot_token: String,
    /// Key for the chat-completion endpoint.
    pub ai_api_key: String,
    /// Completion model identifier.
    pub ai_model: String,
    /// Weather-API key; `None` disables the weather command.
    pub weather_api_key: Option<String>,
    /// Public base address for artifact URLs; `None` falls back to the
    /// request host (or a root-relative path).
    pub public_base_url: Option<String>,
    /// Port for the HTTP front door.
    pub http_port: u16,
    /// Directory holding the notes file and the uploads directory.
    pub data_dir: PathBuf,
}

impl Config {
    /// Builds the configuration from the process environment.
    ///
    /// Fails when a mandatory credential is missing; the process must not
    /// come up without them.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup<F>(get: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bot_token = get(BOT_TOKEN_ENV)
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::MissingVar(BOT_TOKEN_ENV))?;
        let ai_api_key = get(AI_API_KEY_ENV)
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::MissingVar(AI_API_KEY_ENV))?;

        let ai_model = get(AI_MODEL_ENV)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        // An empty optional key means "feature disabled", same as absent.
        let weather_api_key = get(WEATHER_API_KEY_ENV).filter(|v| !v.trim().is_empty());
        let public_base_url = get(PUBLIC_BASE_URL_ENV)
            .map(|v| v.trim_end_matches('/').to_string())
            .filter(|v| !v.is_empty());

        let http_port = match get(PORT_ENV) {
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidVar {
                var: PORT_ENV,
                value: raw,
            })?,
            None => DEFAULT_PORT,
        };

        let data_dir = get(DATA_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));

        Ok(Self {
            bot_token,
            ai_api_key,
            ai_model,
            weather_api_key,
            public_base_url,
            http_port,
            data_dir,
        })
    }

    /// Directory holding uploaded and generated artifacts.
    pub fn uploads_dir(&self) -> PathBuf {
        self.data_dir.join(UPLOADS_SUBDIR)
    }

    /// Path of the shared notes document.
    pub fn notes_file(&self) -> PathBuf {
        self.data_dir.join(NOTES_FILE)
    }

    /// Creates the data and uploads directories if missing.
    pub fn ensure_dirs(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(self.uploads_dir())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        let map: HashMap<&str, &str> = vars.iter().copied().collect();
        move |name| map.get(name).map(|v| v.to_string())
    }

    #[test]
    fn test_mandatory_vars_required() {
        let result = Config::from_lookup(lookup(&[("OPENROUTER_API_KEY", "k")]));
        assert!(matches!(result, Err(ConfigError::MissingVar("BOT_TOKEN"))));

        let result = Config::from_lookup(lookup(&[("BOT_TOKEN", "t")]));
        assert!(matches!(
            result,
            Err(ConfigError::MissingVar("OPENROUTER_API_KEY"))
        ));
    }

    #[test]
    fn test_defaults_applied() {
        let config =
            Config::from_lookup(lookup(&[("BOT_TOKEN", "t"), ("OPENROUTER_API_KEY", "k")]))
                .unwrap();

        assert_eq!(config.ai_model, DEFAULT_MODEL);
        assert_eq!(config.http_port, 8080);
        assert!(config.weather_api_key.is_none());
        assert!(config.public_base_url.is_none());
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.notes_file(), PathBuf::from("data/notes.json"));
        assert_eq!(config.uploads_dir(), PathBuf::from("data/uploads"));
    }

    #[test]
    fn test_empty_optional_key_is_disabled() {
        let config = Config::from_lookup(lookup(&[
            ("BOT_TOKEN", "t"),
            ("OPENROUTER_API_KEY", "k"),
            ("OPENWEATHER_API_KEY", ""),
        ]))
        .unwrap();

        assert!(config.weather_api_key.is_none());
    }

    #[test]
    fn test_public_base_trailing_slash_stripped() {
        let config = Config::from_lookup(lookup(&[
            ("BOT_TOKEN", "t"),
            ("OPENROUTER_API_KEY", "k"),
            ("PUBLIC_BASE_URL", "https://bot.example.com/"),
        ]))
        .unwrap();

        assert_eq!(
            config.public_base_url.as_deref(),
            Some("https://bot.example.com")
        );
    }

    #[test]
    fn test_invalid_port_rejected() {
        let result = Config::from_lookup(lookup(&[
            ("BOT_TOKEN", "t"),
            ("OPENROUTER_API_KEY", "k"),
            ("PORT", "not-a-port"),
        ]));

        assert!(matches!(
            result,
            Err(ConfigError::InvalidVar { var: "PORT", .. })
        ));
    }
}

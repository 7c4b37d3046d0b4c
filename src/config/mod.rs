
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

pub const PRACTICUM_TOKEN_VAR: &str = "PRACTICUM_TOKEN";
pub const TELEGRAM_TOKEN_VAR: &str = "TELEGRAM_TOKEN";
pub const TELEGRAM_CHAT_ID_VAR: &str = "TELEGRAM_CHAT_ID";

pub const DEFAULT_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },

    #[error("Failed to load env file {path}: {reason}")]
    EnvFile { path: PathBuf, reason: String },
}

/// Runtime configuration, built once at startup and handed to the API
/// client, the Telegram client and the watcher.
#[derive(Clone)]
pub struct Config {
    pub practicum_token: String,
    pub telegram_token: String,
    pub telegram_chat_id: i64,
    pub endpoint: String,
    /// Sleep between polls while the API is healthy.
    pub retry_interval: Duration,
    /// Sleep after a failed iteration.
    pub backoff_interval: Duration,
    pub request_timeout: Duration,
    /// Lower bound for the very first poll.
    pub initial_timestamp: i64,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("practicum_token", &"<redacted>")
            .field("telegram_token", &"<redacted>")
            .field("telegram_chat_id", &self.telegram_chat_id)
            .field("endpoint", &self.endpoint)
            .field("retry_interval", &self.retry_interval)
            .field("backoff_interval", &self.backoff_interval)
            .field("request_timeout", &self.request_timeout)
            .field("initial_timestamp", &self.initial_timestamp)
            .finish()
    }
}

impl Config {
    /// Load configuration from the process environment, reading `.env` first
    /// if one exists in the working directory or its parents.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!("Loaded environment from {}", path.display());
        }
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Like [`Config::from_env`], but reads variables from an explicit file.
    /// Variables already set in the process environment take precedence.
    pub fn from_env_file(path: &Path) -> Result<Self, ConfigError> {
        dotenvy::from_path(path).map_err(|e| ConfigError::EnvFile {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |var: &'static str| -> Result<String, ConfigError> {
            match lookup(var) {
                Some(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
                _ => Err(ConfigError::Missing(var)),
            }
        };

        let practicum_token = required(PRACTICUM_TOKEN_VAR)?;
        let telegram_token = required(TELEGRAM_TOKEN_VAR)?;
        let chat_id_raw = required(TELEGRAM_CHAT_ID_VAR)?;
        let telegram_chat_id = chat_id_raw.parse().map_err(|_| ConfigError::Invalid {
            var: TELEGRAM_CHAT_ID_VAR,
            reason: format!("expected an integer chat id, got '{}'", chat_id_raw),
        })?;

        let duration = |var: &'static str, default: &str| -> Result<Duration, ConfigError> {
            let raw = lookup(var).unwrap_or_else(|| default.to_string());
            parse_duration(&raw).map_err(|reason| ConfigError::Invalid { var, reason })
        };

        let initial_timestamp = match lookup("FROM_DATE") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
                var: "FROM_DATE",
                reason: format!("expected a unix timestamp, got '{}'", raw),
            })?,
            None => 0,
        };

        let config = Self {
            practicum_token,
            telegram_token,
            telegram_chat_id,
            endpoint: lookup("HOMEWORK_ENDPOINT").unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            retry_interval: duration("RETRY_INTERVAL", "10m")?,
            backoff_interval: duration("BACKOFF_INTERVAL", "5s")?,
            request_timeout: duration("REQUEST_TIMEOUT", "30s")?,
            initial_timestamp,
        };
        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.retry_interval.is_zero() {
            return Err(ConfigError::Invalid {
                var: "RETRY_INTERVAL",
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.backoff_interval.is_zero() {
            return Err(ConfigError::Invalid {
                var: "BACKOFF_INTERVAL",
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.backoff_interval >= self.retry_interval {
            return Err(ConfigError::Invalid {
                var: "BACKOFF_INTERVAL",
                reason: format!(
                    "{:?} must be shorter than the retry interval {:?}",
                    self.backoff_interval, self.retry_interval
                ),
            });
        }
        if self.request_timeout.is_zero() {
            return Err(ConfigError::Invalid {
                var: "REQUEST_TIMEOUT",
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.initial_timestamp < 0 {
            return Err(ConfigError::Invalid {
                var: "FROM_DATE",
                reason: "must not be negative".to_string(),
            });
        }
        Ok(())
    }
}

/// Parse durations like `30s`, `10m`, `1h`. A bare number is seconds.
pub fn parse_duration(s: &str) -> Result<Duration, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty duration".to_string());
    }

    let split = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    let (number, unit) = s.split_at(split);
    let value: u64 = number
        .parse()
        .map_err(|_| format!("invalid duration '{}'", s))?;

    let multiplier: u64 = match unit.trim() {
        "" | "s" => 1,
        "m" => 60,
        "h" => 60 * 60,
        other => return Err(format!("unknown duration unit '{}' in '{}'", other, s)),
    };
    let secs = value
        .checked_mul(multiplier)
        .ok_or_else(|| format!("duration '{}' is too large", s))?;

    Ok(Duration::from_secs(secs))
}

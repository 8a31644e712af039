//! Configuration types for the homework bot

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::HomeworkBotError;

pub const PRACTICUM_TOKEN_VAR: &str = "PRACTICUM_TOKEN";
pub const TELEGRAM_TOKEN_VAR: &str = "TELEGRAM_TOKEN";
pub const TELEGRAM_CHAT_ID_VAR: &str = "TELEGRAM_CHAT_ID";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_telegram_api_url")]
    pub telegram_api_url: String,
    #[serde(default = "default_retry_interval")]
    pub retry_interval_seconds: u64,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
    #[serde(default)]
    pub log_file: Option<PathBuf>,
    /// Never read from the config file, see [`Config::resolve_secrets`]
    #[serde(skip)]
    pub secrets: Option<Secrets>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            telegram_api_url: default_telegram_api_url(),
            retry_interval_seconds: default_retry_interval(),
            request_timeout_seconds: default_request_timeout(),
            log_file: None,
            secrets: None,
        }
    }
}

impl Config {
    /// Fill in the secrets from the process environment
    pub fn resolve_secrets(&mut self) -> crate::Result<()> {
        self.secrets = Some(Secrets::from_lookup(|name| std::env::var(name).ok())?);
        Ok(())
    }
}

/// Credentials and destination, sourced from the environment only
#[derive(Clone, PartialEq, Eq)]
pub struct Secrets {
    pub practicum_token: String,
    pub telegram_token: String,
    pub telegram_chat_id: String,
}

impl std::fmt::Debug for Secrets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Secrets")
            .field("telegram_chat_id", &self.telegram_chat_id)
            .finish_non_exhaustive()
    }
}

impl Secrets {
    /// Resolve every required variable through `lookup`.
    ///
    /// Each missing (or empty) variable is logged; the error lists all of them.
    pub fn from_lookup<F>(lookup: F) -> crate::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut missing = Vec::new();
        let mut require = |name: &'static str| match lookup(name) {
            Some(value) if !value.is_empty() => value,
            _ => {
                tracing::error!("Отсутствует обязательная переменная окружения: {}", name);
                missing.push(name);
                String::new()
            }
        };

        let secrets = Self {
            practicum_token: require(PRACTICUM_TOKEN_VAR),
            telegram_token: require(TELEGRAM_TOKEN_VAR),
            telegram_chat_id: require(TELEGRAM_CHAT_ID_VAR),
        };

        if missing.is_empty() {
            Ok(secrets)
        } else {
            Err(HomeworkBotError::Config(format!(
                "Отсутствуют переменные окружения: {}",
                missing.join(", ")
            )))
        }
    }
}

fn default_endpoint() -> String {
    "https://practicum.yandex.ru/api/user_api/homework_statuses/".to_string()
}

fn default_telegram_api_url() -> String {
    "https://api.telegram.org".to_string()
}

fn default_retry_interval() -> u64 {
    600
}

fn default_request_timeout() -> u64 {
    30
}

/// Load configuration from a JSON file
pub fn load_config(path: &Path) -> crate::Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        HomeworkBotError::Config(format!("Failed to read config file {:?}: {}", path, e))
    })?;
    let config: Config = serde_json::from_str(&content).map_err(|e| {
        HomeworkBotError::Config(format!("Failed to parse config file {:?}: {}", path, e))
    })?;
    Ok(config)
}

mod channels;
mod defaults;
mod sources;


pub use channels::*;
pub use sources::*;

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::WatchError;
use defaults::*;

/// Environment variable overriding `practicum.token`.
pub const ENV_PRACTICUM_TOKEN: &str = "PRACTICUM_TOKEN";
/// Environment variable overriding `telegram.bot_token`.
pub const ENV_TELEGRAM_TOKEN: &str = "TELEGRAM_TOKEN";
/// Environment variable overriding `telegram.chat_id`.
pub const ENV_TELEGRAM_CHAT_ID: &str = "TELEGRAM_CHAT_ID";

/// Top-level hwatch configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub watch: WatchConfig,
    #[serde(default)]
    pub practicum: PracticumConfig,
    #[serde(default)]
    pub telegram: TelegramConfig,
}

/// Poll loop settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Fixed pause between poll cycles.
    #[serde(default = "default_retry_period")]
    pub retry_period_secs: u64,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    /// How far back `from_date` reaches. 0 = from the epoch.
    #[serde(default)]
    pub lookback_secs: u64,
    /// Send failed-cycle reports to the chat (deduplicated by error text).
    /// Off by default: a failed cycle normally sends nothing.
    #[serde(default)]
    pub report_errors: bool,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Optional log file. Empty = stderr only.
    #[serde(default)]
    pub log_file: String,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            retry_period_secs: default_retry_period(),
            request_timeout_secs: default_request_timeout(),
            lookback_secs: 0,
            report_errors: false,
            log_level: default_log_level(),
            log_file: String::new(),
        }
    }
}

impl WatchConfig {
    /// The `from_date` to query at wall-clock time `now` (unix seconds).
    pub fn window_start(&self, now: i64) -> i64 {
        window_start(self.lookback_secs, now)
    }
}

/// Start of a status window reaching `lookback_secs` back from `now`.
/// A zero lookback means "from the epoch".
pub fn window_start(lookback_secs: u64, now: i64) -> i64 {
    if lookback_secs == 0 {
        return 0;
    }
    let lookback = i64::try_from(lookback_secs).unwrap_or(i64::MAX);
    now.saturating_sub(lookback).max(0)
}

impl Config {
    /// Overlay credentials from the environment. Empty values are ignored.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(token) = get(ENV_PRACTICUM_TOKEN) {
            self.practicum.token = token;
        }
        if let Some(token) = get(ENV_TELEGRAM_TOKEN) {
            self.telegram.bot_token = token;
        }
        if let Some(chat_id) = get(ENV_TELEGRAM_CHAT_ID) {
            self.telegram.chat_id = chat_id;
        }
    }

    /// Names of the required credentials that are still empty.
    pub fn missing_credentials(&self) -> Vec<&'static str> {
        [
            (ENV_PRACTICUM_TOKEN, &self.practicum.token),
            (ENV_TELEGRAM_TOKEN, &self.telegram.bot_token),
            (ENV_TELEGRAM_CHAT_ID, &self.telegram.chat_id),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }

    /// Fail when any required credential is missing.
    pub fn require_credentials(&self) -> Result<(), WatchError> {
        let missing = self.missing_credentials();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(WatchError::Config(format!(
                "missing required variables: {}",
                missing.join(", ")
            )))
        }
    }
}

/// Expand `~` to home directory.
pub fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = std::env::var_os("HOME") {
            return format!("{}/{rest}", home.to_string_lossy());
        }
    }
    path.to_string()
}

/// Load configuration from a TOML file.
///
/// Returns `Ok(None)` when the file does not exist, so the caller can fall
/// back to defaults once logging is up.
pub fn load(path: &str) -> Result<Option<Config>, WatchError> {
    let path = Path::new(path);
    if !path.exists() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(path)?;

    let config: Config = toml::from_str(&content)
        .map_err(|e| WatchError::Config(format!("failed to parse config: {}", e)))?;

    Ok(Some(config))
}

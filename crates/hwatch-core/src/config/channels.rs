use super::defaults::*;
use serde::{Deserialize, Serialize};

/// Telegram bot config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    #[serde(default)]
    pub bot_token: String,
    /// Destination chat: a numeric id or an `@channel` username.
    #[serde(default)]
    pub chat_id: String,
    /// Bot API root, without the `/bot<token>` suffix.
    #[serde(default = "default_telegram_api")]
    pub api_url: String,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            bot_token: String::new(),
            chat_id: String::new(),
            api_url: default_telegram_api(),
        }
    }
}

//! Telegram Bot API channel.
//!
//! Outbound only: notifications go out through `sendMessage`.
//! Docs: <https://core.telegram.org/bots/api>

mod send;
pub(crate) mod types;

#[cfg(test)]
mod tests;

use hwatch_core::config::TelegramConfig;

/// Telegram message length limit, in bytes of UTF-8 text.
pub(crate) const MAX_MESSAGE_LEN: usize = 4096;

/// Telegram channel using the Bot API.
pub struct TelegramChannel {
    client: reqwest::Client,
    base_url: String,
}

impl TelegramChannel {
    /// Create a new Telegram channel from config.
    pub fn new(config: TelegramConfig) -> Self {
        let base_url = format!(
            "{}/bot{}",
            config.api_url.trim_end_matches('/'),
            config.bot_token
        );
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }
}

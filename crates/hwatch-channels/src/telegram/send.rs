//! Outbound `sendMessage` calls and the `Channel` impl.

use super::types::{TgResponse, TgSentMessage};
use super::{TelegramChannel, MAX_MESSAGE_LEN};
use async_trait::async_trait;
use hwatch_core::{error::WatchError, traits::Channel};
use tracing::debug;

impl TelegramChannel {
    /// Send a text message to a chat, split into Telegram-sized chunks.
    pub(super) async fn send_message(&self, chat_id: &str, text: &str) -> Result<(), WatchError> {
        let url = format!("{}/sendMessage", self.base_url);
        let target = chat_target(chat_id);

        for chunk in split_message(text, MAX_MESSAGE_LEN) {
            let body = serde_json::json!({
                "chat_id": target,
                "text": chunk,
            });

            let resp = self
                .client
                .post(&url)
                .json(&body)
                .send()
                .await
                .map_err(|e| {
                    WatchError::Delivery(format!("telegram send failed: {}", e.without_url()))
                })?;

            let status = resp.status();
            let reply: TgResponse<TgSentMessage> = resp.json().await.map_err(|e| {
                WatchError::Delivery(format!(
                    "telegram send got {status} with unreadable body: {}",
                    e.without_url()
                ))
            })?;

            if !status.is_success() || !reply.ok {
                return Err(WatchError::Delivery(format!(
                    "telegram send got {status}: {}",
                    reply.description.unwrap_or_default()
                )));
            }
            debug!("telegram chunk sent ({} bytes)", chunk.len());
        }

        Ok(())
    }
}

#[async_trait]
impl Channel for TelegramChannel {
    fn name(&self) -> &str {
        "telegram"
    }

    async fn send(&self, chat_id: &str, text: &str) -> Result<(), WatchError> {
        if chat_id.trim().is_empty() {
            return Err(WatchError::Delivery("no telegram chat_id configured".into()));
        }
        self.send_message(chat_id, text).await
    }
}

/// Numeric chat ids go out as numbers, `@username` targets as strings.
pub(super) fn chat_target(chat_id: &str) -> serde_json::Value {
    match chat_id.trim().parse::<i64>() {
        Ok(id) => serde_json::Value::from(id),
        Err(_) => serde_json::Value::from(chat_id.trim()),
    }
}

/// Split a long message into chunks that respect Telegram's limit.
pub(super) fn split_message(text: &str, max_len: usize) -> Vec<&str> {
    if text.len() <= max_len {
        return vec![text];
    }

    let mut chunks = Vec::new();
    let mut start = 0;

    while start < text.len() {
        let mut end = (start + max_len).min(text.len());
        while end > start && !text.is_char_boundary(end) {
            end -= 1;
        }
        // Limit narrower than one character: emit that character whole.
        if end == start {
            end += text[start..].chars().next().map_or(1, char::len_utf8);
        }
        let break_at = if end < text.len() {
            text[start..end]
                .rfind('\n')
                .map(|i| start + i + 1)
                .unwrap_or(end)
        } else {
            end
        };
        chunks.push(&text[start..break_at]);
        start = break_at;
    }

    chunks
}

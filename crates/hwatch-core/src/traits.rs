use crate::error::WatchError;
use async_trait::async_trait;

/// Status source trait: where homework statuses come from.
///
/// Implementations perform one request per call and never retry;
/// retrying is the poll loop's job.
#[async_trait]
pub trait StatusSource: Send + Sync {
    /// Human-readable source name.
    fn name(&self) -> &str;

    /// Fetch the raw status payload for homeworks updated since `since`
    /// (unix seconds).
    async fn fetch(&self, since: i64) -> Result<serde_json::Value, WatchError>;
}

/// Messaging Channel trait: where notifications go.
#[async_trait]
pub trait Channel: Send + Sync {
    /// Human-readable channel name.
    fn name(&self) -> &str;

    /// Send `text` to the chat identified by `chat_id`.
    async fn send(&self, chat_id: &str, text: &str) -> Result<(), WatchError>;
}

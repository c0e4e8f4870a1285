//! Best-effort notification delivery.
//!
//! A [`Notifier`] binds a channel to its destination chat and swallows
//! delivery failures: they are logged and reported as
//! [`DeliveryResult::Failed`], never propagated, and never retried.

use hwatch_core::{message::NotificationMessage, traits::Channel};
use std::sync::Arc;
use tracing::{error, info};

/// Outcome of a single delivery attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryResult {
    Delivered,
    Failed,
}

impl DeliveryResult {
    pub fn is_delivered(self) -> bool {
        matches!(self, Self::Delivered)
    }
}

/// Sends rendered messages to one chat through one channel.
#[derive(Clone)]
pub struct Notifier {
    channel: Arc<dyn Channel>,
    chat_id: String,
}

impl Notifier {
    pub fn new(channel: Arc<dyn Channel>, chat_id: impl Into<String>) -> Self {
        Self {
            channel,
            chat_id: chat_id.into(),
        }
    }

    /// Attempt delivery once.
    pub async fn deliver(&self, message: &NotificationMessage) -> DeliveryResult {
        match self.channel.send(&self.chat_id, message.text()).await {
            Ok(()) => {
                info!(channel = self.channel.name(), "notification delivered");
                DeliveryResult::Delivered
            }
            Err(e) => {
                error!(
                    channel = self.channel.name(),
                    kind = e.kind(),
                    "failed to deliver notification: {e}"
                );
                DeliveryResult::Failed
            }
        }
    }
}

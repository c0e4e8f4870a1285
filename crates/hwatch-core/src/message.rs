use crate::{catalog::ReviewStatus, error::WatchError};
use std::fmt;

/// A fully rendered notification, ready for a channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationMessage(String);

impl NotificationMessage {
    /// Announce that a homework moved to `status`.
    pub fn status_changed(name: &str, status: ReviewStatus) -> Self {
        Self(format!("Status of \"{name}\" changed. {}", status.verdict()))
    }

    /// Report a failed poll cycle to the chat.
    pub fn failure(error: &WatchError) -> Self {
        Self(format!("Program failure: {error}"))
    }

    pub fn text(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NotificationMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_changed_text() {
        let msg = NotificationMessage::status_changed("X", ReviewStatus::Reviewing);
        assert_eq!(
            msg.text(),
            "Status of \"X\" changed. Работа взята на проверку ревьюером."
        );
    }

    #[test]
    fn test_failure_text_embeds_error() {
        let msg = NotificationMessage::failure(&WatchError::HttpStatus(503));
        assert_eq!(msg.to_string(), "Program failure: unexpected HTTP status 503");
    }
}

//! Known homework review statuses and their verdict texts.

use crate::error::WatchError;
use std::fmt;
use std::str::FromStr;

/// Review state of a homework, as reported by the status API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReviewStatus {
    /// Reviewer accepted the work.
    Approved,
    /// Work is being reviewed.
    Reviewing,
    /// Reviewer sent the work back with remarks.
    Rejected,
}

impl ReviewStatus {
    pub const ALL: [ReviewStatus; 3] = [Self::Approved, Self::Reviewing, Self::Rejected];

    /// Look up a status by its wire code. Unknown codes yield `None`.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "approved" => Some(Self::Approved),
            "reviewing" => Some(Self::Reviewing),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    /// Wire code as sent by the API.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Approved => "approved",
            Self::Reviewing => "reviewing",
            Self::Rejected => "rejected",
        }
    }

    /// Human-readable verdict sentence sent to the chat.
    pub fn verdict(&self) -> &'static str {
        match self {
            Self::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
            Self::Reviewing => "Работа взята на проверку ревьюером.",
            Self::Rejected => "Работа проверена: у ревьюера есть замечания.",
        }
    }
}

impl fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for ReviewStatus {
    type Err = WatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s).ok_or_else(|| WatchError::UnknownStatus(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_round_trip_through_catalog() {
        for status in ReviewStatus::ALL {
            assert_eq!(ReviewStatus::from_code(status.code()), Some(status));
        }
    }

    #[test]
    fn test_unknown_code_is_an_error() {
        assert_eq!(ReviewStatus::from_code("lost"), None);
        assert_eq!(ReviewStatus::from_code("Approved"), None);
        let err = "lost".parse::<ReviewStatus>().unwrap_err();
        assert!(matches!(err, WatchError::UnknownStatus(ref code) if code == "lost"));
    }

    #[test]
    fn test_verdicts_are_distinct() {
        assert_ne!(
            ReviewStatus::Approved.verdict(),
            ReviewStatus::Rejected.verdict()
        );
        assert_eq!(
            ReviewStatus::Reviewing.verdict(),
            "Работа взята на проверку ревьюером."
        );
    }
}

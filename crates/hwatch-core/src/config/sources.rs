use serde::{Deserialize, Serialize};

/// Practicum status API credentials.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PracticumConfig {
    /// OAuth token sent as `Authorization: OAuth <token>`.
    #[serde(default)]
    pub token: String,
}

use thiserror::Error;

/// Top-level error type for hwatch.
#[derive(Debug, Error)]
pub enum WatchError {
    /// Network-level failure talking to the status API (refused, timeout, DNS).
    #[error("transport error: {0}")]
    Transport(String),

    /// The status API answered with something other than 200.
    #[error("unexpected HTTP status {0}")]
    HttpStatus(u16),

    /// The response body is not valid JSON.
    #[error("decode error: {0}")]
    Decode(String),

    /// The decoded payload does not have the expected top-level shape.
    #[error("malformed response: {0}")]
    Shape(String),

    /// A homework record lacks a required field.
    #[error("malformed homework record: {0}")]
    Field(String),

    /// A homework record carries a status outside the known catalog.
    #[error("unknown homework status '{0}'")]
    UnknownStatus(String),

    /// A notification could not be delivered.
    #[error("delivery error: {0}")]
    Delivery(String),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl WatchError {
    /// Short machine-friendly name of the error kind, used as a log field.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Transport(_) => "transport",
            Self::HttpStatus(_) => "http_status",
            Self::Decode(_) => "decode",
            Self::Shape(_) => "shape",
            Self::Field(_) => "field",
            Self::UnknownStatus(_) => "unknown_status",
            Self::Delivery(_) => "delivery",
            Self::Config(_) => "config",
            Self::Io(_) => "io",
        }
    }
}

//! Validation and extraction of homework status payloads.
//!
//! The status API is untrusted: [`validate`] is the single gate that checks
//! the top-level shape, and individual records are only inspected when the
//! poll loop asks for them through [`TrackedItemRecord`].

use crate::{catalog::ReviewStatus, error::WatchError, message::NotificationMessage};
use serde_json::Value;

const CURRENT_DATE: &str = "current_date";
const HOMEWORKS: &str = "homeworks";
const HOMEWORK_NAME: &str = "homework_name";
const STATUS: &str = "status";

/// A status payload whose top-level shape has been checked.
///
/// Records inside `homeworks` are kept raw; nothing about them is trusted yet.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    current_date: Value,
    homeworks: Vec<Value>,
}

impl ApiResponse {
    /// Server timestamp of the answer, when it is an integer.
    pub fn current_date(&self) -> Option<i64> {
        self.current_date.as_i64()
    }

    pub fn homeworks(&self) -> &[Value] {
        &self.homeworks
    }

    pub fn is_empty(&self) -> bool {
        self.homeworks.is_empty()
    }
}

/// One homework record, newest first by API convention.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackedItemRecord {
    raw: Value,
}

impl TrackedItemRecord {
    pub fn new(raw: Value) -> Self {
        Self { raw }
    }

    /// The homework's display name.
    pub fn name(&self) -> Result<&str, WatchError> {
        match self.raw.get(HOMEWORK_NAME) {
            None | Some(Value::Null) => Err(WatchError::Field("missing name".into())),
            Some(Value::String(name)) => Ok(name),
            Some(_) => Err(WatchError::Field("name is not a string".into())),
        }
    }

    /// The homework's review status, checked against the catalog.
    pub fn status(&self) -> Result<ReviewStatus, WatchError> {
        let code = self
            .raw
            .get(STATUS)
            .and_then(Value::as_str)
            .ok_or_else(|| WatchError::Field("missing status".into()))?;
        code.parse()
    }
}

/// Check an untrusted decoded payload against the expected shape.
pub fn validate(raw: Value) -> Result<ApiResponse, WatchError> {
    let Value::Object(mut fields) = raw else {
        return Err(WatchError::Shape("response is not an object".into()));
    };

    let current_date = fields
        .remove(CURRENT_DATE)
        .ok_or_else(|| WatchError::Shape(format!("missing {CURRENT_DATE}")))?;

    let homeworks = match fields.remove(HOMEWORKS) {
        None => return Err(WatchError::Shape(format!("missing {HOMEWORKS}"))),
        Some(Value::Array(items)) => items,
        Some(_) => return Err(WatchError::Shape(format!("{HOMEWORKS} not a list"))),
    };

    Ok(ApiResponse {
        current_date,
        homeworks,
    })
}

/// The newest record of a validated response, or `None` when the window
/// holds no homeworks. Older records are ignored.
pub fn most_recent(response: ApiResponse) -> Option<TrackedItemRecord> {
    response
        .homeworks
        .into_iter()
        .next()
        .map(TrackedItemRecord::new)
}

/// Render the status-change notification for `record`.
pub fn render(record: &TrackedItemRecord) -> Result<NotificationMessage, WatchError> {
    let name = record.name()?;
    let status = record.status()?;
    Ok(NotificationMessage::status_changed(name, status))
}

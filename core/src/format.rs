//! Turns a homework record into the notification text.

use serde_json::Value;
use tracing::error;

use crate::catalog::HomeworkStatus;
use crate::error::PollError;

/// Build the status-change notification for one homework record.
///
/// Checks run in order: `status` present, `homework_name` present, status
/// known to the catalog.
pub fn format_status(record: &Value) -> Result<String, PollError> {
    let Some(status) = record.get("status") else {
        error!("homework record {record} has no status");
        return Err(PollError::NoStatus);
    };
    let Some(name) = record.get("homework_name") else {
        error!("homework record {record} has no name");
        return Err(PollError::NoName);
    };

    let code = status.as_str().map_or_else(|| status.to_string(), str::to_string);
    let Some(status) = HomeworkStatus::from_code(&code) else {
        error!("homework record {record} has undocumented status {code}");
        return Err(PollError::UnknownStatus(code));
    };

    let name = name.as_str().map_or_else(|| name.to_string(), str::to_string);
    Ok(format!(
        "Изменился статус проверки работы \"{name}\". {}",
        status.verdict()
    ))
}

//! Domain view of a homework API response.
//!
//! # Design
//! Records stay as raw `serde_json::Value`s: the API may add fields at any
//! time, change detection compares whole records, and the formatter reports
//! missing keys itself. Only the envelope is given a Rust shape.

use serde_json::Value;

use crate::error::PollError;
use crate::validate::check_response;

/// A validated homework API response.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    /// Submissions, most recent first.
    pub homeworks: Vec<Value>,
    /// Cursor for the next poll. `None` when absent or not an integer.
    pub current_date: Option<i64>,
}

impl TryFrom<Value> for ApiResponse {
    type Error = PollError;

    fn try_from(mut value: Value) -> Result<Self, Self::Error> {
        check_response(&value)?;
        let current_date = value.get("current_date").and_then(Value::as_i64);
        let Some(Value::Array(homeworks)) = value.get_mut("homeworks").map(Value::take) else {
            return Err(PollError::MissingField("homeworks"));
        };
        Ok(Self {
            homeworks,
            current_date,
        })
    }
}

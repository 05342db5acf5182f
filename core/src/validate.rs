//! Shape checks for decoded homework API responses.
//!
//! Only the envelope is checked here: the response must be an object with a
//! `homeworks` list. Individual records are checked when they are formatted,
//! and `current_date` is read leniently by `ApiResponse`.

use serde_json::Value;
use tracing::{error, info};

use crate::error::PollError;

/// Check that `response` is an object carrying a `homeworks` list.
///
/// Rules are applied in order and the first failure wins.
pub fn check_response(response: &Value) -> Result<(), PollError> {
    let Some(object) = response.as_object() else {
        error!("API response is {}, expected an object", json_kind(response));
        return Err(PollError::MalformedResponse(format!(
            "expected an object, got {}",
            json_kind(response)
        )));
    };

    let Some(homeworks) = object.get("homeworks") else {
        error!("API response has no `homeworks` key");
        return Err(PollError::MissingField("homeworks"));
    };

    if !homeworks.is_array() {
        error!("`homeworks` is {}, expected a list", json_kind(homeworks));
        return Err(PollError::MalformedResponse(format!(
            "`homeworks` is {}, expected a list",
            json_kind(homeworks)
        )));
    }

    info!("API response matches the documented shape");
    Ok(())
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

//! Decoding of API replies into [`SubmissionResult`].
//!
//! This is the only place that looks at raw response shapes. Everything
//! downstream branches on the decoded variant.

use serde_json::Value;

use crate::fields::FieldErrors;

/// How a form's endpoint signals success.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Acceptance {
    /// 2xx and a body of the form `{"success": true, "data": ...}`. The payload is `data`.
    Envelope,
    /// Any 2xx. The payload is the whole body.
    Status,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionResult {
    Success {
        payload: Value,
    },
    /// The server understood the request and declined it. `message` is `None`
    /// when the body carried no usable text; the form supplies its default.
    Rejected {
        message: Option<String>,
        field_errors: FieldErrors,
    },
    /// No interpretable response.
    Unreachable {
        message: String,
    },
}

impl SubmissionResult {
    pub fn unreachable(message: impl Into<String>) -> Self {
        Self::Unreachable {
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// Decode one HTTP reply. An empty body reads as `null`; any other body that is
/// not JSON makes the reply unreachable.
pub fn decode_response(acceptance: Acceptance, status: u16, body: &[u8]) -> SubmissionResult {
    let json = if body.iter().all(u8::is_ascii_whitespace) {
        Value::Null
    } else {
        match serde_json::from_slice::<Value>(body) {
            Ok(v) => v,
            Err(e) => {
                return SubmissionResult::unreachable(format!(
                    "unreadable response body (status {status}): {e}"
                ))
            }
        }
    };

    let ok = (200..300).contains(&status);
    let accepted = match acceptance {
        Acceptance::Status => ok,
        Acceptance::Envelope => ok && json.get("success").and_then(Value::as_bool) == Some(true),
    };

    if accepted {
        let payload = match acceptance {
            Acceptance::Status => json,
            Acceptance::Envelope => json.get("data").cloned().unwrap_or(Value::Null),
        };
        return SubmissionResult::Success { payload };
    }

    SubmissionResult::Rejected {
        message: rejection_message(&json),
        field_errors: rejection_field_errors(&json),
    }
}

/// `error.message`, then `message`, passed through as sent. Blank strings do
/// not count.
pub fn rejection_message(body: &Value) -> Option<String> {
    [body.pointer("/error/message"), body.get("message")]
        .into_iter()
        .flatten()
        .filter_map(Value::as_str)
        .find(|s| !s.trim().is_empty())
        .map(str::to_string)
}

/// `error.details`, then `errors`. Values are passed through: strings as-is,
/// lists of strings joined with a space.
pub fn rejection_field_errors(body: &Value) -> FieldErrors {
    let source = [body.pointer("/error/details"), body.get("errors")]
        .into_iter()
        .flatten()
        .find_map(Value::as_object);

    let Some(map) = source else {
        return FieldErrors::new();
    };

    map.iter()
        .filter_map(|(field, value)| field_message(value).map(|msg| (field.clone(), msg)))
        .collect()
}

fn field_message(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Array(items) => {
            let parts: Vec<&str> = items.iter().filter_map(Value::as_str).collect();
            (!parts.is_empty()).then(|| parts.join(" "))
        }
        _ => None,
    }
}

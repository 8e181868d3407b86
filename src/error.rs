//! Error taxonomy for the client layer.
//!
//! Response bodies are decoded into [`ApiError`] exactly once, at the client
//! boundary. Stores and UI callers only ever match on these variants (or call
//! `to_string()` for a toast message) instead of groping raw JSON shapes like
//! `message.email[0]` at every call site.

use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Structured 4xx body with per-field messages.
    #[error("{}", validation_summary(.fields))]
    Validation {
        fields: BTreeMap<String, Vec<String>>,
    },

    /// Network-level failure, surfaced after retries were exhausted.
    #[error("network error: {0}")]
    Transport(String),

    /// Non-2xx with a usable plain message body.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// Still rate limited after honoring every `Retry-After` we were given.
    #[error("rate limited by the server, try again later")]
    RateLimited,

    /// A body we could not make sense of.
    #[error("unexpected server response")]
    Unknown { raw: String },
}

impl ApiError {
    /// Field-level messages for form rendering, if this is a validation error.
    pub fn field_errors(&self) -> Option<&BTreeMap<String, Vec<String>>> {
        match self {
            ApiError::Validation { fields } => Some(fields),
            _ => None,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ApiError::Validation { .. })
    }
}

fn validation_summary(fields: &BTreeMap<String, Vec<String>>) -> String {
    let mut parts = Vec::with_capacity(fields.len());
    for (field, messages) in fields {
        match messages.first() {
            Some(first) => parts.push(format!("{field}: {first}")),
            None => parts.push(field.clone()),
        }
    }
    if parts.is_empty() {
        "validation failed".to_string()
    } else {
        parts.join("; ")
    }
}

/// Decode a non-2xx response body into an [`ApiError`].
///
/// Known shapes, in order:
/// - `{"message": "plain text"}`
/// - `{"message": {"detail": "plain text"}}`
/// - `{"message": {"email": ["taken"], ...}}` (per-field arrays or strings)
/// - `{"detail": "plain text"}`
///
/// Anything else lands in `Unknown` with the raw body attached.
pub fn decode_error(status: u16, body: &[u8]) -> ApiError {
    let raw = || String::from_utf8_lossy(body).into_owned();

    let value: Value = match serde_json::from_slice(body) {
        Ok(v) => v,
        Err(_) => {
            let text = raw();
            if text.trim().is_empty() {
                return ApiError::Status {
                    status,
                    message: format!("request failed with status {status}"),
                };
            }
            return ApiError::Unknown { raw: text };
        }
    };

    match value.get("message") {
        Some(Value::String(message)) => ApiError::Status {
            status,
            message: message.clone(),
        },
        Some(Value::Object(map)) => {
            if let Some(detail) = map.get("detail").and_then(Value::as_str) {
                return ApiError::Status {
                    status,
                    message: detail.to_string(),
                };
            }
            let fields = collect_field_errors(map);
            if fields.is_empty() {
                ApiError::Unknown { raw: raw() }
            } else {
                ApiError::Validation { fields }
            }
        }
        _ => match value.get("detail").and_then(Value::as_str) {
            Some(detail) => ApiError::Status {
                status,
                message: detail.to_string(),
            },
            None => ApiError::Unknown { raw: raw() },
        },
    }
}

fn collect_field_errors(map: &serde_json::Map<String, Value>) -> BTreeMap<String, Vec<String>> {
    let mut fields = BTreeMap::new();
    for (field, value) in map {
        let messages: Vec<String> = match value {
            Value::String(s) => vec![s.clone()],
            Value::Array(items) => items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect(),
            _ => Vec::new(),
        };
        if !messages.is_empty() {
            fields.insert(field.clone(), messages);
        }
    }
    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_message_becomes_status() {
        let err = decode_error(404, br#"{"message": "post not found"}"#);
        match err {
            ApiError::Status { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "post not found");
            }
            other => panic!("expected Status, got {other:?}"),
        }
    }

    #[test]
    fn detail_inside_message_becomes_status() {
        let err = decode_error(401, br#"{"message": {"detail": "token expired"}}"#);
        assert_eq!(err.to_string(), "token expired");
    }

    #[test]
    fn field_map_becomes_validation() {
        let body = br#"{"message": {"email": ["already registered"], "username": "too short"}}"#;
        let err = decode_error(422, body);
        let fields = err.field_errors().expect("validation error");
        assert_eq!(fields["email"], vec!["already registered"]);
        assert_eq!(fields["username"], vec!["too short"]);
        assert!(err.to_string().contains("email: already registered"));
    }

    #[test]
    fn top_level_detail_becomes_status() {
        let err = decode_error(403, br#"{"detail": "not allowed"}"#);
        assert_eq!(err.to_string(), "not allowed");
    }

    #[test]
    fn garbage_body_becomes_unknown() {
        let err = decode_error(500, b"<html>oops</html>");
        match err {
            ApiError::Unknown { raw } => assert!(raw.contains("oops")),
            other => panic!("expected Unknown, got {other:?}"),
        }
    }

    #[test]
    fn empty_body_becomes_status_with_code() {
        let err = decode_error(502, b"");
        assert_eq!(err.to_string(), "request failed with status 502");
    }
}

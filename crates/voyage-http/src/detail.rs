//! User-facing error payloads
//!
//! Servers answer failures with `{message}`, `{error}`, or a validation
//! shape `{message?, errors: [...]}` whose entries are strings or objects
//! carrying `msg`/`message`. Pages only ever see the typed form.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ErrorDetail {
    Message {
        message: String,
    },
    Validation {
        message: String,
        field_errors: Vec<String>,
    },
}

impl ErrorDetail {
    pub fn plain(message: impl Into<String>) -> Self {
        ErrorDetail::Message {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>, field_errors: Vec<String>) -> Self {
        ErrorDetail::Validation {
            message: message.into(),
            field_errors,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ErrorDetail::Message { message } | ErrorDetail::Validation { message, .. } => message,
        }
    }

    pub fn field_errors(&self) -> &[String] {
        match self {
            ErrorDetail::Message { .. } => &[],
            ErrorDetail::Validation { field_errors, .. } => field_errors,
        }
    }

    /// Extract a detail from a non-success response body
    pub fn from_body(status: u16, body: &str) -> Self {
        let fallback = format!("Request failed with status {}", status);

        let Ok(Value::Object(map)) = serde_json::from_str::<Value>(body) else {
            return ErrorDetail::plain(fallback);
        };

        let message = ["message", "error"]
            .iter()
            .find_map(|key| map.get(*key).and_then(Value::as_str))
            .map(str::to_string);

        let field_errors: Vec<String> = map
            .get("errors")
            .and_then(Value::as_array)
            .map(|entries| entries.iter().filter_map(entry_text).collect())
            .unwrap_or_default();

        if field_errors.is_empty() {
            ErrorDetail::plain(message.unwrap_or(fallback))
        } else {
            ErrorDetail::validation(
                message.unwrap_or_else(|| "Validation failed".to_string()),
                field_errors,
            )
        }
    }
}

fn entry_text(entry: &Value) -> Option<String> {
    match entry {
        Value::String(s) => Some(s.clone()),
        Value::Object(obj) => ["msg", "message"]
            .iter()
            .find_map(|key| obj.get(*key).and_then(Value::as_str))
            .map(str::to_string),
        _ => None,
    }
}

impl std::fmt::Display for ErrorDetail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorDetail::Message { message } => write!(f, "{}", message),
            ErrorDetail::Validation {
                message,
                field_errors,
            } => write!(f, "{}: {}", message, field_errors.join("; ")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_message() {
        let detail = ErrorDetail::from_body(401, r#"{"message":"Invalid credentials"}"#);
        assert_eq!(detail, ErrorDetail::plain("Invalid credentials"));

        let detail = ErrorDetail::from_body(500, r#"{"error":"Boom"}"#);
        assert_eq!(detail.message(), "Boom");
        assert!(detail.field_errors().is_empty());
    }

    #[test]
    fn test_validation_errors() {
        let body = r#"{
            "message": "Invalid input",
            "errors": [
                {"msg": "Email is required", "param": "email"},
                "Password too short",
                {"message": "Phone is invalid"},
                42
            ]
        }"#;

        let detail = ErrorDetail::from_body(422, body);
        assert_eq!(
            detail,
            ErrorDetail::validation(
                "Invalid input",
                vec![
                    "Email is required".to_string(),
                    "Password too short".to_string(),
                    "Phone is invalid".to_string(),
                ]
            )
        );
    }

    #[test]
    fn test_validation_without_message() {
        let detail = ErrorDetail::from_body(400, r#"{"errors":["bad"]}"#);
        assert_eq!(detail.message(), "Validation failed");
        assert_eq!(detail.field_errors(), ["bad".to_string()]);
    }

    #[test]
    fn test_unusable_bodies_fall_back_to_status() {
        for body in ["", "<html>502</html>", "[]", r#"{"errors":[]}"#] {
            let detail = ErrorDetail::from_body(502, body);
            assert_eq!(detail.message(), "Request failed with status 502");
        }
    }

    #[test]
    fn test_serialized_tag() {
        let json = serde_json::to_value(ErrorDetail::validation("x", vec!["y".into()])).unwrap();
        assert_eq!(json["kind"], "validation");
        assert_eq!(json["field_errors"][0], "y");
    }
}

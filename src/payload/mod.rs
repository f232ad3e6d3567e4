//! Field-level validation errors shared by request payload validators.
//!
//! Request bodies arrive as loosely typed JSON. Validators inspect them field
//! by field and report the first failure as a [`FieldError`], which carries a
//! machine-checkable kind and field name plus an HTTP-agnostic rendering.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// Status code reported by [`FieldError::rendering`].
pub const UNPROCESSABLE_STATUS: u16 = 422;

/// The category of a field validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldErrorKind {
    /// A required field is absent.
    MissingField,
    /// A field is present but has the wrong JSON type.
    IncorrectFieldType,
    /// A field is well-typed but its value is unacceptable, for example a
    /// reference to an entity that does not exist.
    IncorrectFieldValue,
}

impl FieldErrorKind {
    /// Returns the human-readable prefix used in rendered messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "Missing field",
            Self::IncorrectFieldType => "Incorrect field type",
            Self::IncorrectFieldValue => "Incorrect field value",
        }
    }
}

impl fmt::Display for FieldErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validation failure attributed to a single request field.
///
/// # Examples
///
/// ```
/// use sup::payload::{FieldError, FieldErrorKind};
///
/// let error = FieldError::missing("text");
/// assert_eq!(error.kind(), FieldErrorKind::MissingField);
/// assert_eq!(error.to_string(), "Missing field: text");
/// assert_eq!(error.rendering().status, 422);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[error("{kind}: {field}")]
pub struct FieldError {
    kind: FieldErrorKind,
    field: &'static str,
}

impl FieldError {
    /// Creates an error of the given kind for `field`.
    #[must_use]
    pub const fn new(kind: FieldErrorKind, field: &'static str) -> Self {
        Self { kind, field }
    }

    /// Reports that `field` is absent.
    #[must_use]
    pub const fn missing(field: &'static str) -> Self {
        Self::new(FieldErrorKind::MissingField, field)
    }

    /// Reports that `field` has the wrong type.
    #[must_use]
    pub const fn incorrect_type(field: &'static str) -> Self {
        Self::new(FieldErrorKind::IncorrectFieldType, field)
    }

    /// Reports that `field` holds an unacceptable value.
    #[must_use]
    pub const fn incorrect_value(field: &'static str) -> Self {
        Self::new(FieldErrorKind::IncorrectFieldValue, field)
    }

    /// Returns the failure category.
    #[must_use]
    pub const fn kind(&self) -> FieldErrorKind {
        self.kind
    }

    /// Returns the name of the offending field.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        self.field
    }

    /// Renders the error as a status code and JSON body.
    #[must_use]
    pub fn rendering(&self) -> ErrorRendering {
        ErrorRendering {
            status: UNPROCESSABLE_STATUS,
            body: ErrorBody::new(self.to_string()),
        }
    }
}

/// JSON body used for every error response: `{ "message": "..." }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable error description.
    pub message: String,
}

impl ErrorBody {
    /// Creates a body carrying `message`.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Transport-independent rendering of an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorRendering {
    /// HTTP status code.
    pub status: u16,
    /// Response body.
    pub body: ErrorBody,
}

/// Reads a required string field from a JSON payload.
///
/// Non-object payloads behave as if every field were absent.
///
/// # Errors
///
/// Returns [`FieldErrorKind::MissingField`] when the key is absent and
/// [`FieldErrorKind::IncorrectFieldType`] when it holds anything other than a
/// string, including `null`.
pub fn require_string<'a>(payload: &'a Value, field: &'static str) -> Result<&'a str, FieldError> {
    match payload.get(field) {
        None => Err(FieldError::missing(field)),
        Some(Value::String(value)) => Ok(value),
        Some(_) => Err(FieldError::incorrect_type(field)),
    }
}

/// Reads an optional string field from a JSON payload.
///
/// # Errors
///
/// Returns [`FieldErrorKind::IncorrectFieldType`] when the key is present but
/// does not hold a string.
pub fn optional_string<'a>(
    payload: &'a Value,
    field: &'static str,
) -> Result<Option<&'a str>, FieldError> {
    match payload.get(field) {
        None => Ok(None),
        Some(Value::String(value)) => Ok(Some(value)),
        Some(_) => Err(FieldError::incorrect_type(field)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(FieldError::missing("text"), "Missing field: text")]
    #[case(FieldError::incorrect_type("to"), "Incorrect field type: to")]
    #[case(FieldError::incorrect_value("to"), "Incorrect field value: to")]
    fn rendering_uses_kind_prefix_and_field(#[case] error: FieldError, #[case] expected: &str) {
        let rendering = error.rendering();
        assert_eq!(rendering.status, 422);
        assert_eq!(rendering.body.message, expected);
    }

    #[test]
    fn error_body_serialises_as_message_object() {
        let body = serde_json::to_value(ErrorBody::new("Message not found")).expect("serialise");
        assert_eq!(body, json!({ "message": "Message not found" }));
    }

    #[rstest]
    #[case(json!({}), Err(FieldError::missing("name")))]
    #[case(json!({ "name": 7 }), Err(FieldError::incorrect_type("name")))]
    #[case(json!({ "name": null }), Err(FieldError::incorrect_type("name")))]
    #[case(json!(["name"]), Err(FieldError::missing("name")))]
    #[case(json!({ "name": "joe" }), Ok("joe"))]
    fn require_string_reports_first_problem(
        #[case] payload: Value,
        #[case] expected: Result<&str, FieldError>,
    ) {
        assert_eq!(require_string(&payload, "name"), expected);
    }

    #[test]
    fn optional_string_accepts_absent_field() {
        assert_eq!(optional_string(&json!({}), "to"), Ok(None));
    }

    #[test]
    fn optional_string_rejects_non_string() {
        assert_eq!(
            optional_string(&json!({ "to": 42 }), "to"),
            Err(FieldError::incorrect_type("to"))
        );
    }
}

//! Message payload validation.
//!
//! [`validate_message`] is a pure shape check over the raw JSON body. It does
//! not consult the user directory: whether `to` names a real user is decided
//! afterwards by the messaging service.

use crate::message::domain::MessageText;
use crate::payload::{FieldError, optional_string, require_string};
use serde_json::Value;

/// Checks that a candidate message payload is well-formed.
///
/// Checks run in order and the first failure wins:
///
/// 1. `text` is present
/// 2. `text` is a string
/// 3. `to`, when present, is a string
///
/// Any other key, including `from`, is ignored.
///
/// # Errors
///
/// Returns the first [`FieldError`] encountered.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use sup::message::validation::validate_message;
///
/// assert!(validate_message(&json!({"text": "hi"})).is_ok());
/// let error = validate_message(&json!({"to": 1})).unwrap_err();
/// assert_eq!(error.to_string(), "Missing field: text");
/// ```
pub fn validate_message(payload: &Value) -> Result<(), FieldError> {
    require_string(payload, "text")?;
    optional_string(payload, "to")?;
    Ok(())
}

/// A validated message submission.
///
/// Carries no sender field. The sender is always the
/// authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageDraft {
    to: Option<String>,
    text: MessageText,
}

impl MessageDraft {
    /// Validates `payload` and extracts the recipient reference and text.
    ///
    /// # Errors
    ///
    /// Returns the [`validate_message`] failure, or
    /// [`FieldError::incorrect_value`] for `text` when it is empty.
    pub fn from_payload(payload: &Value) -> Result<Self, FieldError> {
        validate_message(payload)?;
        let raw_text = require_string(payload, "text")?;
        let text = MessageText::new(raw_text).map_err(|_| FieldError::incorrect_value("text"))?;
        let to = optional_string(payload, "to")?.map(str::to_owned);
        Ok(Self { to, text })
    }

    /// Returns the unresolved recipient reference, if supplied.
    #[must_use]
    pub fn to(&self) -> Option<&str> {
        self.to.as_deref()
    }

    /// Returns the message text.
    #[must_use]
    pub const fn text(&self) -> &MessageText {
        &self.text
    }

    /// Splits the draft into its parts.
    #[must_use]
    pub fn into_parts(self) -> (Option<String>, MessageText) {
        (self.to, self.text)
    }
}

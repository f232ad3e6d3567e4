//! Registration and account-edit payload validation.

use crate::payload::{FieldError, require_string};
use crate::user::domain::Username;
use serde_json::Value;

/// A validated `{username, password}` payload.
///
/// The password is held in plaintext only until the service hashes it.
#[derive(Clone, PartialEq, Eq)]
pub struct UserDraft {
    username: Username,
    password: String,
}

impl UserDraft {
    /// Validates a registration or edit payload.
    ///
    /// Fields are checked in order: `username` present, `username` a string,
    /// `password` present, `password` a string. A blank or oversized
    /// username is reported as an incorrect value.
    ///
    /// # Errors
    ///
    /// Returns the first [`FieldError`] encountered.
    ///
    /// # Examples
    ///
    /// ```
    /// use serde_json::json;
    /// use sup::user::validation::UserDraft;
    ///
    /// let draft = UserDraft::from_payload(&json!({"username": "joe", "password": "pw"}))
    ///     .expect("valid payload");
    /// assert_eq!(draft.username().as_str(), "joe");
    ///
    /// let error = UserDraft::from_payload(&json!({"username": 42})).unwrap_err();
    /// assert_eq!(error.to_string(), "Incorrect field type: username");
    /// ```
    pub fn from_payload(payload: &Value) -> Result<Self, FieldError> {
        let raw_username = require_string(payload, "username")?;
        let password = require_string(payload, "password")?;
        let username =
            Username::new(raw_username).map_err(|_| FieldError::incorrect_value("username"))?;
        Ok(Self {
            username,
            password: password.to_owned(),
        })
    }

    /// Returns the validated username.
    #[must_use]
    pub const fn username(&self) -> &Username {
        &self.username
    }

    /// Returns the plaintext password.
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Splits the draft into its parts.
    #[must_use]
    pub fn into_parts(self) -> (Username, String) {
        (self.username, self.password)
    }
}

impl std::fmt::Debug for UserDraft {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserDraft")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

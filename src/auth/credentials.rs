//! Parsing of `Authorization: Basic` header values.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use super::AuthFailure;

/// A username and password pair presented by a client.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    /// Creates credentials from their parts.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Parses a `Basic <base64(username:password)>` header value.
    ///
    /// The scheme name is matched case-insensitively. The password is
    /// everything after the first colon and may itself contain colons.
    ///
    /// # Errors
    ///
    /// Returns [`AuthFailure::MalformedCredentials`] for any other scheme,
    /// invalid base64, non-UTF-8 content or a missing colon.
    ///
    /// # Examples
    ///
    /// ```
    /// use sup::auth::Credentials;
    ///
    /// // "alice:pw"
    /// let credentials = Credentials::from_basic_header("Basic YWxpY2U6cHc=").expect("valid");
    /// assert_eq!(credentials.username(), "alice");
    /// assert_eq!(credentials.password(), "pw");
    /// ```
    pub fn from_basic_header(value: &str) -> Result<Self, AuthFailure> {
        let (scheme, encoded) = value
            .trim()
            .split_once(' ')
            .ok_or(AuthFailure::MalformedCredentials)?;
        if !scheme.eq_ignore_ascii_case("basic") {
            return Err(AuthFailure::MalformedCredentials);
        }

        let decoded = STANDARD
            .decode(encoded.trim())
            .map_err(|_| AuthFailure::MalformedCredentials)?;
        let pair = String::from_utf8(decoded).map_err(|_| AuthFailure::MalformedCredentials)?;
        let (username, password) = pair
            .split_once(':')
            .ok_or(AuthFailure::MalformedCredentials)?;
        Ok(Self::new(username, password))
    }

    /// Returns the presented username.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the presented password.
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

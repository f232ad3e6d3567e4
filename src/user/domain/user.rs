//! The User entity and its validated scalar types.

use super::{UserDomainError, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique, non-empty login name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Username(String);

impl Username {
    /// Longest username representable in the `PostgreSQL` schema.
    pub const MAX_LENGTH: usize = 255;

    /// Creates a validated username.
    ///
    /// Surrounding whitespace is significant and kept as supplied; only a
    /// value that is blank after trimming is rejected.
    ///
    /// # Errors
    ///
    /// Returns [`UserDomainError::EmptyUsername`] for blank values and
    /// [`UserDomainError::UsernameTooLong`] when the value exceeds
    /// [`Username::MAX_LENGTH`] characters.
    pub fn new(value: impl Into<String>) -> Result<Self, UserDomainError> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(UserDomainError::EmptyUsername);
        }
        let length = raw.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(UserDomainError::UsernameTooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }
        Ok(Self(raw))
    }

    /// Returns the username as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Stored password hash in modular crypt format.
///
/// The `Debug` output is redacted so hashes never reach logs.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wraps an already-computed hash.
    #[must_use]
    pub fn from_hash(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    /// Returns the encoded hash.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}

/// A registered user.
///
/// Messages reference users by [`UserId`] only; users own nothing.
///
/// # Examples
///
/// ```
/// use sup::user::domain::{User, Username};
/// use mockable::DefaultClock;
///
/// let user = User::new(Username::new("alice").expect("valid username"), &DefaultClock);
/// assert_eq!(user.username().as_str(), "alice");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    username: Username,
    created_at: DateTime<Utc>,
}

impl User {
    /// Creates a new user with a fresh identifier.
    #[must_use]
    pub fn new(username: Username, clock: &impl Clock) -> Self {
        Self::new_with_id(UserId::new(), username, clock)
    }

    /// Creates a new user with a specified identifier.
    #[must_use]
    pub fn new_with_id(id: UserId, username: Username, clock: &impl Clock) -> Self {
        Self {
            id,
            username,
            created_at: clock.utc(),
        }
    }

    /// Reconstructs a user from persisted fields.
    #[must_use]
    pub const fn from_persisted(id: UserId, username: Username, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            username,
            created_at,
        }
    }

    /// Returns a copy of this user carrying a different username.
    #[must_use]
    pub fn with_username(self, username: Username) -> Self {
        Self { username, ..self }
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the username.
    #[must_use]
    pub const fn username(&self) -> &Username {
        &self.username
    }

    /// Returns the registration timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// A user together with the credential material needed to authenticate them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserCredentials {
    /// The registered user.
    pub user: User,
    /// The stored password hash.
    pub password_hash: PasswordHash,
}

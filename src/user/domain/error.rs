//! Error types for user domain validation.

use thiserror::Error;

/// Errors returned while constructing user domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserDomainError {
    /// The username is empty after trimming.
    #[error("username must not be empty")]
    EmptyUsername,

    /// The username exceeds the persisted column width.
    #[error("username is {actual} characters long, exceeds limit of {max}")]
    UsernameTooLong {
        /// The maximum allowed length.
        max: usize,
        /// The actual length.
        actual: usize,
    },
}

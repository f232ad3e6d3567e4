//! Error types for message domain values.

use thiserror::Error;

/// Errors returned while constructing message domain values.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum MessageDomainError {
    /// The message text is the empty string.
    #[error("message text must not be empty")]
    EmptyText,
}

//! Password hashing port.

use crate::user::domain::PasswordHash;
use std::sync::Arc;
use thiserror::Error;

/// One-way password hashing and verification.
pub trait PasswordHasher: Send + Sync {
    /// Hashes a plaintext password.
    ///
    /// # Errors
    ///
    /// Returns [`HashingError`] when the hashing backend fails.
    fn hash(&self, password: &str) -> Result<PasswordHash, HashingError>;

    /// Checks a plaintext password against a stored hash.
    ///
    /// # Errors
    ///
    /// Returns [`HashingError`] when the stored hash cannot be decoded.
    fn verify(&self, password: &str, hash: &PasswordHash) -> Result<bool, HashingError>;
}

/// Failure raised by a password hashing backend.
#[derive(Debug, Clone, Error)]
#[error("password hashing failed: {0}")]
pub struct HashingError(Arc<dyn std::error::Error + Send + Sync>);

impl HashingError {
    /// Wraps a backend error.
    pub fn new(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self(Arc::new(err))
    }
}

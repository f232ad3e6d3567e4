//! Directory port for user registration and lookup.
//!
//! Defines the abstract interface for storing and retrieving users, allowing
//! different persistence implementations (`PostgreSQL`, in-memory, etc.).

use crate::user::domain::{PasswordHash, User, UserCredentials, UserId, Username};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for directory operations.
pub type DirectoryResult<T> = Result<T, DirectoryError>;

/// Port for user persistence and lookup.
///
/// # Implementation Notes
///
/// Implementations must ensure:
/// - User IDs are unique across the directory
/// - Usernames are unique across the directory
/// - [`UserDirectory::find_all`] returns users in registration order
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Registers a new user with their password hash.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::DuplicateUser`] when the ID is taken,
    /// [`DirectoryError::DuplicateUsername`] when the username is taken, or
    /// [`DirectoryError::Persistence`] when storage fails.
    async fn register(&self, user: &User, password_hash: &PasswordHash) -> DirectoryResult<()>;

    /// Finds a user by identifier.
    ///
    /// Returns `None` when no such user exists.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Persistence`] when the lookup fails.
    async fn find_by_id(&self, id: UserId) -> DirectoryResult<Option<User>>;

    /// Finds a user by username.
    ///
    /// Returns `None` when no such user exists.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Persistence`] when the lookup fails.
    async fn find_by_username(&self, username: &Username) -> DirectoryResult<Option<User>>;

    /// Returns every registered user in registration order.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Persistence`] when the query fails.
    async fn find_all(&self) -> DirectoryResult<Vec<User>>;

    /// Returns the user and stored password hash for `username`.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Persistence`] when the lookup fails.
    async fn find_credentials(
        &self,
        username: &Username,
    ) -> DirectoryResult<Option<UserCredentials>>;

    /// Replaces the username and password hash of an existing user.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::NotFound`] when the user does not exist and
    /// [`DirectoryError::DuplicateUsername`] when another user already holds
    /// the new username.
    async fn update(&self, user: &User, password_hash: &PasswordHash) -> DirectoryResult<()>;
}

/// Errors returned by user directory implementations.
#[derive(Debug, Clone, Error)]
pub enum DirectoryError {
    /// A user with the same identifier already exists.
    #[error("duplicate user identifier: {0}")]
    DuplicateUser(UserId),

    /// A user with the same username already exists.
    #[error("duplicate username: {0}")]
    DuplicateUsername(Username),

    /// The user was not found.
    #[error("user not found: {0}")]
    NotFound(UserId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl DirectoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

//! Service layer for user registration, lookup and self-edit.

use crate::payload::FieldError;
use crate::user::{
    domain::{PasswordHash, User, UserId, Username},
    ports::{DirectoryError, HashingError, PasswordHasher, UserDirectory},
    validation::UserDraft,
};
use mockable::Clock;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for user operations.
#[derive(Debug, Error)]
pub enum UserServiceError {
    /// The request payload failed validation.
    #[error(transparent)]
    Field(#[from] FieldError),

    /// No user has the requested username.
    #[error("user not found: {0}")]
    NotFound(String),

    /// The caller may not modify the requested user.
    #[error("user {caller} may not modify {target}")]
    Unauthorized {
        /// The authenticated caller.
        caller: UserId,
        /// The user the caller tried to modify.
        target: UserId,
    },

    /// Directory operation failed.
    #[error(transparent)]
    Directory(DirectoryError),

    /// Password hashing failed.
    #[error(transparent)]
    Hashing(#[from] HashingError),
}

impl From<DirectoryError> for UserServiceError {
    fn from(err: DirectoryError) -> Self {
        match err {
            DirectoryError::DuplicateUsername(_) => {
                Self::Field(FieldError::incorrect_value("username"))
            }
            other => Self::Directory(other),
        }
    }
}

/// Result type for user service operations.
pub type UserServiceResult<T> = Result<T, UserServiceError>;

/// User registration and account management service.
pub struct UserService<D, H, C>
where
    D: UserDirectory,
    H: PasswordHasher + 'static,
    C: Clock + Send + Sync,
{
    directory: Arc<D>,
    hasher: Arc<H>,
    clock: Arc<C>,
}

impl<D, H, C> Clone for UserService<D, H, C>
where
    D: UserDirectory,
    H: PasswordHasher + 'static,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            directory: Arc::clone(&self.directory),
            hasher: Arc::clone(&self.hasher),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<D, H, C> UserService<D, H, C>
where
    D: UserDirectory,
    H: PasswordHasher + 'static,
    C: Clock + Send + Sync,
{
    /// Creates a new user service.
    #[must_use]
    pub const fn new(directory: Arc<D>, hasher: Arc<H>, clock: Arc<C>) -> Self {
        Self {
            directory,
            hasher,
            clock,
        }
    }

    /// Registers a new user from a `{username, password}` payload.
    ///
    /// # Errors
    ///
    /// Returns [`UserServiceError::Field`] for invalid payloads and taken
    /// usernames, or a directory or hashing failure.
    pub async fn register(&self, payload: &Value) -> UserServiceResult<User> {
        let (username, password) = UserDraft::from_payload(payload)?.into_parts();
        if self.directory.find_by_username(&username).await?.is_some() {
            return Err(FieldError::incorrect_value("username").into());
        }

        let password_hash = self.hash_password(password).await?;
        let user = User::new(username, &*self.clock);
        self.directory.register(&user, &password_hash).await?;
        tracing::info!(user_id = %user.id(), username = %user.username(), "user registered");
        Ok(user)
    }

    /// Lists every registered user in registration order.
    ///
    /// # Errors
    ///
    /// Returns [`UserServiceError::Directory`] when the listing fails.
    pub async fn list(&self) -> UserServiceResult<Vec<User>> {
        Ok(self.directory.find_all().await?)
    }

    /// Looks up a user by username.
    ///
    /// # Errors
    ///
    /// Returns [`UserServiceError::NotFound`] when no such user exists.
    pub async fn find_by_username(&self, username: &str) -> UserServiceResult<User> {
        let Ok(lookup) = Username::new(username) else {
            return Err(UserServiceError::NotFound(username.to_owned()));
        };
        self.directory
            .find_by_username(&lookup)
            .await?
            .ok_or_else(|| UserServiceError::NotFound(username.to_owned()))
    }

    /// Replaces the caller's own username and password.
    ///
    /// The target must exist and be the caller before the payload is
    /// validated.
    ///
    /// # Errors
    ///
    /// Returns [`UserServiceError::NotFound`], then
    /// [`UserServiceError::Unauthorized`], then a validation or directory
    /// failure.
    pub async fn update(
        &self,
        caller: UserId,
        username: &str,
        payload: &Value,
    ) -> UserServiceResult<User> {
        let target = self.find_by_username(username).await?;
        if target.id() != caller {
            return Err(UserServiceError::Unauthorized {
                caller,
                target: target.id(),
            });
        }

        let (new_username, password) = UserDraft::from_payload(payload)?.into_parts();
        let password_hash = self.hash_password(password).await?;
        let updated = target.with_username(new_username);
        self.directory.update(&updated, &password_hash).await?;
        tracing::info!(user_id = %updated.id(), username = %updated.username(), "user updated");
        Ok(updated)
    }

    async fn hash_password(&self, password: String) -> UserServiceResult<PasswordHash> {
        let hasher = Arc::clone(&self.hasher);
        let hash = tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(HashingError::new)??;
        Ok(hash)
    }
}

//! Credential verification against the user directory.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use super::Credentials;
use crate::user::{
    domain::{UserId, Username},
    ports::{DirectoryError, HashingError, PasswordHasher, UserDirectory},
};

/// The resolved principal for an authenticated request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// The caller's user identifier.
    pub user_id: UserId,
    /// The caller's username at authentication time.
    pub username: Username,
}

/// Reasons a request could not be authenticated.
#[derive(Debug, Clone, Error)]
pub enum AuthFailure {
    /// No `Authorization` header was sent.
    #[error("missing credentials")]
    MissingCredentials,

    /// The `Authorization` header could not be decoded.
    #[error("malformed credentials")]
    MalformedCredentials,

    /// No user has the presented username.
    #[error("unknown user")]
    UnknownUser,

    /// The presented password did not match.
    #[error("invalid password")]
    InvalidPassword,

    /// The directory lookup failed.
    #[error(transparent)]
    Directory(#[from] DirectoryError),

    /// The stored hash could not be checked.
    #[error(transparent)]
    Hashing(#[from] HashingError),
}

impl AuthFailure {
    /// Returns `true` when the failure is the client's fault rather than an
    /// infrastructure fault.
    #[must_use]
    pub const fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::MissingCredentials
                | Self::MalformedCredentials
                | Self::UnknownUser
                | Self::InvalidPassword
        )
    }
}

/// Resolves presented credentials to an [`Identity`].
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Authenticates `credentials`.
    ///
    /// # Errors
    ///
    /// Returns an [`AuthFailure`] describing why the credentials were refused
    /// or could not be checked.
    async fn authenticate(&self, credentials: &Credentials) -> Result<Identity, AuthFailure>;
}

/// [`Authenticator`] backed by a [`UserDirectory`] and a [`PasswordHasher`].
pub struct DirectoryAuthenticator<D, H>
where
    D: UserDirectory,
    H: PasswordHasher + 'static,
{
    directory: Arc<D>,
    hasher: Arc<H>,
}

impl<D, H> DirectoryAuthenticator<D, H>
where
    D: UserDirectory,
    H: PasswordHasher + 'static,
{
    /// Creates an authenticator over `directory` using `hasher` to verify
    /// passwords.
    #[must_use]
    pub const fn new(directory: Arc<D>, hasher: Arc<H>) -> Self {
        Self { directory, hasher }
    }
}

#[async_trait]
impl<D, H> Authenticator for DirectoryAuthenticator<D, H>
where
    D: UserDirectory,
    H: PasswordHasher + 'static,
{
    async fn authenticate(&self, credentials: &Credentials) -> Result<Identity, AuthFailure> {
        let username =
            Username::new(credentials.username()).map_err(|_| AuthFailure::UnknownUser)?;
        let stored = self
            .directory
            .find_credentials(&username)
            .await?
            .ok_or(AuthFailure::UnknownUser)?;

        let hasher = Arc::clone(&self.hasher);
        let password = credentials.password().to_owned();
        let hash = stored.password_hash.clone();
        let verified = tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(HashingError::new)??;
        if !verified {
            return Err(AuthFailure::InvalidPassword);
        }

        Ok(Identity {
            user_id: stored.user.id(),
            username: stored.user.username().clone(),
        })
    }
}

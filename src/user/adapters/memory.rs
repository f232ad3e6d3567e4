//! In-memory implementation of the `UserDirectory` port.
//!
//! Thread-safe via internal [`RwLock`]. Used by unit tests and by the server
//! when no database is configured.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::user::{
    domain::{PasswordHash, User, UserCredentials, UserId, Username},
    ports::{DirectoryError, DirectoryResult, UserDirectory},
};

/// Thread-safe in-memory user directory.
///
/// # Example
///
/// ```
/// use sup::user::adapters::memory::InMemoryUserDirectory;
///
/// let directory = InMemoryUserDirectory::new();
/// assert!(directory.is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserDirectory {
    state: Arc<RwLock<InMemoryDirectoryState>>,
}

#[derive(Debug, Default)]
struct InMemoryDirectoryState {
    records: HashMap<UserId, UserCredentials>,
    username_index: HashMap<Username, UserId>,
    registration_order: Vec<UserId>,
}

impl InMemoryUserDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of registered users.
    ///
    /// Returns `0` if the internal lock is poisoned.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state
            .read()
            .map(|guard| guard.records.len())
            .unwrap_or(0)
    }

    /// Returns `true` if no users are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn lock_error(err: impl std::fmt::Display) -> DirectoryError {
    DirectoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn register(&self, user: &User, password_hash: &PasswordHash) -> DirectoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        if state.records.contains_key(&user.id()) {
            return Err(DirectoryError::DuplicateUser(user.id()));
        }
        if state.username_index.contains_key(user.username()) {
            return Err(DirectoryError::DuplicateUsername(user.username().clone()));
        }

        state
            .username_index
            .insert(user.username().clone(), user.id());
        state.registration_order.push(user.id());
        state.records.insert(
            user.id(),
            UserCredentials {
                user: user.clone(),
                password_hash: password_hash.clone(),
            },
        );
        Ok(())
    }

    async fn find_by_id(&self, id: UserId) -> DirectoryResult<Option<User>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.records.get(&id).map(|record| record.user.clone()))
    }

    async fn find_by_username(&self, username: &Username) -> DirectoryResult<Option<User>> {
        let state = self.state.read().map_err(lock_error)?;
        let user = state
            .username_index
            .get(username)
            .and_then(|id| state.records.get(id))
            .map(|record| record.user.clone());
        Ok(user)
    }

    async fn find_all(&self) -> DirectoryResult<Vec<User>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state
            .registration_order
            .iter()
            .filter_map(|id| state.records.get(id))
            .map(|record| record.user.clone())
            .collect())
    }

    async fn find_credentials(
        &self,
        username: &Username,
    ) -> DirectoryResult<Option<UserCredentials>> {
        let state = self.state.read().map_err(lock_error)?;
        let credentials = state
            .username_index
            .get(username)
            .and_then(|id| state.records.get(id))
            .cloned();
        Ok(credentials)
    }

    async fn update(&self, user: &User, password_hash: &PasswordHash) -> DirectoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let previous = state
            .records
            .get(&user.id())
            .ok_or(DirectoryError::NotFound(user.id()))?
            .user
            .username()
            .clone();

        if let Some(holder) = state.username_index.get(user.username())
            && *holder != user.id()
        {
            return Err(DirectoryError::DuplicateUsername(user.username().clone()));
        }

        state.username_index.remove(&previous);
        state
            .username_index
            .insert(user.username().clone(), user.id());
        state.records.insert(
            user.id(),
            UserCredentials {
                user: user.clone(),
                password_hash: password_hash.clone(),
            },
        );
        Ok(())
    }
}

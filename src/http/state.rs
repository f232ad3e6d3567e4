//! Shared handler state.

use std::sync::Arc;

use mockable::Clock;

use crate::auth::Authenticator;
use crate::message::{ports::MessageStore, services::MessagingService};
use crate::user::{
    ports::{PasswordHasher, UserDirectory},
    services::UserService,
};

/// The concrete adapter set a router is built over.
pub trait Backend: Send + Sync + 'static {
    /// Message persistence.
    type Store: MessageStore + 'static;
    /// User persistence.
    type Directory: UserDirectory + 'static;
    /// Password hashing.
    type Hasher: PasswordHasher + 'static;
    /// Time source.
    type Clock: Clock + Send + Sync + 'static;
}

/// Messaging service specialised to a [`Backend`].
pub type BackendMessaging<B> =
    MessagingService<<B as Backend>::Store, <B as Backend>::Directory, <B as Backend>::Clock>;

/// User service specialised to a [`Backend`].
pub type BackendUsers<B> =
    UserService<<B as Backend>::Directory, <B as Backend>::Hasher, <B as Backend>::Clock>;

/// State shared by every request handler.
pub struct AppState<B: Backend> {
    /// Message posting and reading.
    pub messaging: Arc<BackendMessaging<B>>,
    /// User registration and lookup.
    pub users: Arc<BackendUsers<B>>,
    /// Per-request credential check.
    pub authenticator: Arc<dyn Authenticator>,
}

impl<B: Backend> AppState<B> {
    /// Bundles the services into handler state.
    #[must_use]
    pub fn new(
        messaging: BackendMessaging<B>,
        users: BackendUsers<B>,
        authenticator: Arc<dyn Authenticator>,
    ) -> Self {
        Self {
            messaging: Arc::new(messaging),
            users: Arc::new(users),
            authenticator,
        }
    }
}

impl<B: Backend> Clone for AppState<B> {
    fn clone(&self) -> Self {
        Self {
            messaging: Arc::clone(&self.messaging),
            users: Arc::clone(&self.users),
            authenticator: Arc::clone(&self.authenticator),
        }
    }
}

//! Shared world state for message access BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use sup::message::{
    adapters::memory::InMemoryMessageStore,
    domain::{Message, MessageId, MessageView},
    services::{MessagingError, MessagingService},
};
use sup::user::{adapters::memory::InMemoryUserDirectory, domain::UserId};

/// Service type used by the BDD world.
pub type TestMessagingService = MessagingService<
    InMemoryMessageStore<InMemoryUserDirectory>,
    InMemoryUserDirectory,
    DefaultClock,
>;

/// Scenario world for message access behaviour tests.
pub struct AccessWorld {
    pub directory: Arc<InMemoryUserDirectory>,
    pub service: TestMessagingService,
    pub users: HashMap<String, UserId>,
    pub last_message: Option<MessageId>,
    pub last_post: Option<Result<Message, MessagingError>>,
    pub last_fetch: Option<Result<MessageView, MessagingError>>,
    pub last_listing: Option<Result<Vec<MessageView>, MessagingError>>,
}

impl AccessWorld {
    /// Creates a world with an empty directory and store.
    #[must_use]
    pub fn new() -> Self {
        let directory = Arc::new(InMemoryUserDirectory::new());
        let store = Arc::new(InMemoryMessageStore::new(Arc::clone(&directory)));
        let service = MessagingService::new(store, Arc::clone(&directory), Arc::new(DefaultClock));
        Self {
            directory,
            service,
            users: HashMap::new(),
            last_message: None,
            last_post: None,
            last_fetch: None,
            last_listing: None,
        }
    }

    /// Looks up a user registered by an earlier step.
    pub fn user(&self, name: &str) -> Result<UserId, eyre::Report> {
        self.users
            .get(name)
            .copied()
            .ok_or_else(|| eyre::eyre!("user {name} was not registered in this scenario"))
    }
}

impl Default for AccessWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> AccessWorld {
    AccessWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

//! In-memory implementation of the `MessageStore` port.
//!
//! Thread-safe via internal [`RwLock`]. Participant usernames are resolved at
//! read time from the shared user directory, mirroring the join performed by
//! the `PostgreSQL` store.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::message::{
    access::MessageQuery,
    domain::{Message, MessageId, MessageView},
    ports::{MessageStore, MessageStoreError, MessageStoreResult},
};
use crate::user::ports::UserDirectory;

/// Thread-safe in-memory message store.
///
/// Messages are kept in insertion order.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use sup::message::adapters::memory::InMemoryMessageStore;
/// use sup::user::adapters::memory::InMemoryUserDirectory;
///
/// let store = InMemoryMessageStore::new(Arc::new(InMemoryUserDirectory::new()));
/// assert!(store.is_empty());
/// ```
#[derive(Debug)]
pub struct InMemoryMessageStore<D: UserDirectory> {
    messages: Arc<RwLock<Vec<Message>>>,
    directory: Arc<D>,
}

impl<D: UserDirectory> Clone for InMemoryMessageStore<D> {
    fn clone(&self) -> Self {
        Self {
            messages: Arc::clone(&self.messages),
            directory: Arc::clone(&self.directory),
        }
    }
}

impl<D: UserDirectory> InMemoryMessageStore<D> {
    /// Creates an empty store that resolves usernames through `directory`.
    #[must_use]
    pub fn new(directory: Arc<D>) -> Self {
        Self {
            messages: Arc::new(RwLock::new(Vec::new())),
            directory,
        }
    }

    /// Returns the number of stored messages.
    ///
    /// Returns `0` if the internal lock is poisoned.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.read().map(|guard| guard.len()).unwrap_or(0)
    }

    /// Returns `true` if no messages are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn snapshot<F>(&self, keep: F) -> MessageStoreResult<Vec<Message>>
    where
        F: Fn(&Message) -> bool,
    {
        let guard = self.messages.read().map_err(lock_error)?;
        Ok(guard.iter().filter(|message| keep(message)).cloned().collect())
    }

    async fn resolve(&self, message: &Message) -> MessageStoreResult<MessageView> {
        let sender = self
            .directory
            .find_by_id(message.sender())
            .await
            .map_err(MessageStoreError::persistence)?;
        let recipient = self
            .directory
            .find_by_id(message.recipient())
            .await
            .map_err(MessageStoreError::persistence)?;
        Ok(MessageView::from_message(
            message,
            sender.as_ref(),
            recipient.as_ref(),
        ))
    }
}

fn lock_error(err: impl std::fmt::Display) -> MessageStoreError {
    MessageStoreError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl<D: UserDirectory> MessageStore for InMemoryMessageStore<D> {
    async fn create(&self, message: &Message) -> MessageStoreResult<()> {
        let mut guard = self.messages.write().map_err(lock_error)?;
        if guard.iter().any(|stored| stored.id() == message.id()) {
            return Err(MessageStoreError::DuplicateMessage(message.id()));
        }
        guard.push(message.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: MessageId) -> MessageStoreResult<Option<MessageView>> {
        let Some(message) = self.snapshot(|message| message.id() == id)?.into_iter().next() else {
            return Ok(None);
        };
        self.resolve(&message).await.map(Some)
    }

    async fn find(&self, query: &MessageQuery) -> MessageStoreResult<Vec<MessageView>> {
        let matches = self.snapshot(|message| query.matches(message))?;
        let mut views = Vec::with_capacity(matches.len());
        for message in &matches {
            views.push(self.resolve(message).await?);
        }
        Ok(views)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::domain::MessageText;
    use crate::user::{
        adapters::memory::InMemoryUserDirectory,
        domain::{PasswordHash, User, UserId, Username},
    };
    use mockable::DefaultClock;
    use rstest::rstest;

    async fn registered(directory: &InMemoryUserDirectory, name: &str) -> User {
        let user = User::new(Username::new(name).expect("valid username"), &DefaultClock);
        directory
            .register(&user, &PasswordHash::from_hash("$2b$04$stored"))
            .await
            .expect("registration should succeed");
        user
    }

    fn message(from: UserId, to: UserId, text: &str) -> Message {
        Message::new(
            from,
            to,
            MessageText::new(text).expect("non-empty text"),
            &DefaultClock,
        )
    }

    #[rstest]
    #[tokio::test(flavor = "multi_thread")]
    async fn create_rejects_duplicate_ids() {
        let store = InMemoryMessageStore::new(Arc::new(InMemoryUserDirectory::new()));
        let stored = message(UserId::new(), UserId::new(), "hi");
        store.create(&stored).await.expect("first create succeeds");

        let result = store.create(&stored).await;

        assert!(matches!(
            result,
            Err(MessageStoreError::DuplicateMessage(id)) if id == stored.id()
        ));
        assert_eq!(store.len(), 1);
    }

    #[rstest]
    #[tokio::test(flavor = "multi_thread")]
    async fn find_by_id_resolves_usernames() {
        let directory = Arc::new(InMemoryUserDirectory::new());
        let alice = registered(&directory, "alice").await;
        let bob = registered(&directory, "bob").await;
        let store = InMemoryMessageStore::new(Arc::clone(&directory));
        let stored = message(alice.id(), bob.id(), "Hi Bob");
        store.create(&stored).await.expect("create succeeds");

        let view = store
            .find_by_id(stored.id())
            .await
            .expect("lookup succeeds")
            .expect("message exists");

        assert_eq!(view.from.username.as_ref(), Some(alice.username()));
        assert_eq!(view.to.username.as_ref(), Some(bob.username()));
        assert_eq!(view.text.as_str(), "Hi Bob");
    }

    #[rstest]
    #[tokio::test(flavor = "multi_thread")]
    async fn unresolvable_participants_keep_their_ids() {
        let store = InMemoryMessageStore::new(Arc::new(InMemoryUserDirectory::new()));
        let ghost = UserId::new();
        let stored = message(ghost, UserId::new(), "boo");
        store.create(&stored).await.expect("create succeeds");

        let views = store
            .find(&MessageQuery::Participant(ghost))
            .await
            .expect("query succeeds");

        assert_eq!(views.len(), 1);
        assert_eq!(views[0].from.id, ghost);
        assert!(views[0].from.username.is_none());
    }

    #[rstest]
    #[tokio::test(flavor = "multi_thread")]
    async fn find_preserves_insertion_order() {
        let store = InMemoryMessageStore::new(Arc::new(InMemoryUserDirectory::new()));
        let caller = UserId::new();
        let other = UserId::new();
        for text in ["first", "second", "third"] {
            store
                .create(&message(caller, other, text))
                .await
                .expect("create succeeds");
        }

        let texts: Vec<String> = store
            .find(&MessageQuery::Participant(caller))
            .await
            .expect("query succeeds")
            .into_iter()
            .map(|view| view.text.into())
            .collect();

        assert_eq!(texts, ["first", "second", "third"]);
    }
}

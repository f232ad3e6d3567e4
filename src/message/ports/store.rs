//! Store port for message persistence.
//!
//! Defines the abstract interface for creating and reading messages, allowing
//! different persistence implementations (`PostgreSQL`, in-memory, etc.).

use crate::message::{
    access::MessageQuery,
    domain::{Message, MessageId, MessageView},
};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for store operations.
pub type MessageStoreResult<T> = Result<T, MessageStoreError>;

/// Port for message persistence.
///
/// # Implementation Notes
///
/// Implementations must ensure:
/// - Message IDs are unique
/// - Messages are immutable after creation (there is no update or delete)
/// - Reads return participants resolved to usernames
/// - [`MessageStore::find`] returns matches in insertion order
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Persists a new message.
    ///
    /// # Errors
    ///
    /// Returns [`MessageStoreError::DuplicateMessage`] when the ID is taken or
    /// [`MessageStoreError::Persistence`] when storage fails.
    async fn create(&self, message: &Message) -> MessageStoreResult<()>;

    /// Retrieves a message by its ID.
    ///
    /// Returns `None` if the message does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`MessageStoreError::Persistence`] when the query fails.
    async fn find_by_id(&self, id: MessageId) -> MessageStoreResult<Option<MessageView>>;

    /// Retrieves every message selected by `query`.
    ///
    /// # Errors
    ///
    /// Returns [`MessageStoreError::Persistence`] when the query fails.
    async fn find(&self, query: &MessageQuery) -> MessageStoreResult<Vec<MessageView>>;
}

/// Errors returned by message store implementations.
#[derive(Debug, Clone, Error)]
pub enum MessageStoreError {
    /// A message with the same identifier already exists.
    #[error("duplicate message ID: {0}")]
    DuplicateMessage(MessageId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl MessageStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

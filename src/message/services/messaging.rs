//! Service layer for posting and reading direct messages.

use crate::message::{
    access::{can_view, scope_list_query},
    domain::{Message, MessageId, MessageView},
    ports::{MessageStore, MessageStoreError},
    validation::MessageDraft,
};
use crate::payload::FieldError;
use crate::user::{
    domain::UserId,
    ports::{DirectoryError, UserDirectory},
};
use mockable::Clock;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for messaging operations.
#[derive(Debug, Error)]
pub enum MessagingError {
    /// The payload failed validation or named no existing recipient.
    #[error(transparent)]
    Field(#[from] FieldError),

    /// No message has the requested identifier.
    #[error("message not found: {0}")]
    NotFound(MessageId),

    /// The caller is neither sender nor recipient.
    #[error("user {caller} may not view message {message}")]
    Unauthorized {
        /// The authenticated caller.
        caller: UserId,
        /// The requested message.
        message: MessageId,
    },

    /// A path or query identifier could not be parsed.
    #[error("invalid '{field}' value: '{value}'")]
    InvalidIdentifier {
        /// The parameter that carried the identifier.
        field: &'static str,
        /// The rejected raw value.
        value: String,
    },

    /// Message store operation failed.
    #[error(transparent)]
    Store(#[from] MessageStoreError),

    /// Recipient lookup failed.
    #[error(transparent)]
    Directory(#[from] DirectoryError),
}

impl MessagingError {
    fn invalid_identifier(field: &'static str, value: &str) -> Self {
        Self::InvalidIdentifier {
            field,
            value: value.to_owned(),
        }
    }
}

/// Result type for messaging service operations.
pub type MessagingResult<T> = Result<T, MessagingError>;

/// Direct-messaging orchestration service.
pub struct MessagingService<S, D, C>
where
    S: MessageStore,
    D: UserDirectory,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    directory: Arc<D>,
    clock: Arc<C>,
}

impl<S, D, C> Clone for MessagingService<S, D, C>
where
    S: MessageStore,
    D: UserDirectory,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            directory: Arc::clone(&self.directory),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<S, D, C> MessagingService<S, D, C>
where
    S: MessageStore,
    D: UserDirectory,
    C: Clock + Send + Sync,
{
    /// Creates a new messaging service.
    #[must_use]
    pub const fn new(store: Arc<S>, directory: Arc<D>, clock: Arc<C>) -> Self {
        Self {
            store,
            directory,
            clock,
        }
    }

    /// Validates `payload` and stores a message from `caller`.
    ///
    /// Any `from` key in the payload is ignored. The recipient must resolve
    /// in the directory before anything is written.
    ///
    /// # Errors
    ///
    /// Returns [`MessagingError::Field`] for malformed payloads and for a
    /// `to` that is absent, unparseable or names no user. Directory and store
    /// faults are returned unchanged and leave nothing stored.
    pub async fn post_message(&self, caller: UserId, payload: &Value) -> MessagingResult<Message> {
        let (to, text) = MessageDraft::from_payload(payload)?.into_parts();
        let recipient_id = to
            .as_deref()
            .and_then(|raw| UserId::parse(raw).ok())
            .ok_or(FieldError::incorrect_value("to"))?;
        let recipient = self
            .directory
            .find_by_id(recipient_id)
            .await?
            .ok_or(FieldError::incorrect_value("to"))?;

        let message = Message::new(caller, recipient.id(), text, &*self.clock);
        self.store.create(&message).await?;
        tracing::info!(
            message_id = %message.id(),
            from = %caller,
            to = %recipient.id(),
            "message created"
        );
        Ok(message)
    }

    /// Lists messages visible to `caller`.
    ///
    /// With no filter, returns everything the caller sent or received. With
    /// a `to` filter, returns only what the caller sent to that user. An
    /// empty filter string is treated as no filter.
    ///
    /// # Errors
    ///
    /// Returns [`MessagingError::InvalidIdentifier`] for a malformed filter
    /// or a store failure.
    pub async fn list_messages(
        &self,
        caller: UserId,
        to_filter: Option<&str>,
    ) -> MessagingResult<Vec<MessageView>> {
        let filter = to_filter
            .filter(|raw| !raw.is_empty())
            .map(|raw| {
                UserId::parse(raw).map_err(|_| MessagingError::invalid_identifier("to", raw))
            })
            .transpose()?;
        let query = scope_list_query(caller, filter);
        Ok(self.store.find(&query).await?)
    }

    /// Fetches a single message if `caller` participates in it.
    ///
    /// # Errors
    ///
    /// Returns [`MessagingError::InvalidIdentifier`] for a malformed id,
    /// [`MessagingError::NotFound`] when the message does not exist and
    /// [`MessagingError::Unauthorized`] when the caller is not a participant.
    pub async fn get_message(
        &self,
        caller: UserId,
        message_id: &str,
    ) -> MessagingResult<MessageView> {
        let id = MessageId::parse(message_id)
            .map_err(|_| MessagingError::invalid_identifier("messageId", message_id))?;
        let view = self
            .store
            .find_by_id(id)
            .await?
            .ok_or(MessagingError::NotFound(id))?;

        if !can_view(caller, &view) {
            tracing::warn!(caller = %caller, message_id = %id, "message access denied");
            return Err(MessagingError::Unauthorized {
                caller,
                message: id,
            });
        }
        Ok(view)
    }
}

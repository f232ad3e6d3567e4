//! The Message entity and its denormalised read model.

use super::{MessageDomainError, MessageId};
use crate::user::domain::{User, UserId, Username};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Non-empty message body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MessageText(String);

impl MessageText {
    /// Creates validated message text.
    ///
    /// Whitespace-only text is accepted; only the empty string is rejected.
    ///
    /// # Errors
    ///
    /// Returns [`MessageDomainError::EmptyText`] for the empty string.
    pub fn new(value: impl Into<String>) -> Result<Self, MessageDomainError> {
        let raw = value.into();
        if raw.is_empty() {
            return Err(MessageDomainError::EmptyText);
        }
        Ok(Self(raw))
    }

    /// Returns the text as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for MessageText {
    type Error = MessageDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<MessageText> for String {
    fn from(value: MessageText) -> Self {
        value.0
    }
}

impl fmt::Display for MessageText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Anything with a sender and a recipient.
///
/// Access checks are written against this trait so they apply equally to
/// freshly created messages and to denormalised views read back from a store.
pub trait Participants {
    /// Returns the sending user.
    fn sender_id(&self) -> UserId;

    /// Returns the receiving user.
    fn recipient_id(&self) -> UserId;
}

/// A direct message from one user to another.
///
/// Messages are immutable once created. The sender is always the
/// authenticated caller and is supplied by the service, never by the payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    id: MessageId,
    from: UserId,
    to: UserId,
    text: MessageText,
    created_at: DateTime<Utc>,
}

impl Message {
    /// Creates a new message with a fresh identifier.
    #[must_use]
    pub fn new(from: UserId, to: UserId, text: MessageText, clock: &impl Clock) -> Self {
        Self::new_with_id(MessageId::new(), from, to, text, clock)
    }

    /// Creates a new message with a specified identifier.
    #[must_use]
    pub fn new_with_id(
        id: MessageId,
        from: UserId,
        to: UserId,
        text: MessageText,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id,
            from,
            to,
            text,
            created_at: clock.utc(),
        }
    }

    /// Reconstructs a message from persisted fields.
    #[must_use]
    pub const fn from_persisted(
        id: MessageId,
        from: UserId,
        to: UserId,
        text: MessageText,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            from,
            to,
            text,
            created_at,
        }
    }

    /// Returns the message identifier.
    #[must_use]
    pub const fn id(&self) -> MessageId {
        self.id
    }

    /// Returns the sender.
    #[must_use]
    pub const fn sender(&self) -> UserId {
        self.from
    }

    /// Returns the recipient.
    #[must_use]
    pub const fn recipient(&self) -> UserId {
        self.to
    }

    /// Returns the message body.
    #[must_use]
    pub const fn text(&self) -> &MessageText {
        &self.text
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Participants for Message {
    fn sender_id(&self) -> UserId {
        self.from
    }

    fn recipient_id(&self) -> UserId {
        self.to
    }
}

/// A user reference resolved for display.
///
/// `username` is `None` when the referenced user no longer resolves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// The referenced user.
    pub id: UserId,
    /// The user's name at read time.
    pub username: Option<Username>,
}

impl Participant {
    /// Builds a participant from an id and an optional directory entry.
    #[must_use]
    pub fn resolve(id: UserId, user: Option<&User>) -> Self {
        Self {
            id,
            username: user.map(|found| found.username().clone()),
        }
    }
}

/// A message with both participants resolved to usernames.
///
/// # Examples
///
/// ```
/// use mockable::DefaultClock;
/// use sup::message::domain::{Message, MessageText, MessageView};
/// use sup::user::domain::{User, Username};
///
/// let alice = User::new(Username::new("alice").expect("valid"), &DefaultClock);
/// let bob = User::new(Username::new("bob").expect("valid"), &DefaultClock);
/// let text = MessageText::new("hi").expect("non-empty");
/// let message = Message::new(alice.id(), bob.id(), text, &DefaultClock);
///
/// let view = MessageView::from_message(&message, Some(&alice), None);
/// assert_eq!(view.from.username.as_ref().map(|name| name.as_str()), Some("alice"));
/// assert!(view.to.username.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageView {
    /// The message identifier.
    pub id: MessageId,
    /// The sender.
    pub from: Participant,
    /// The recipient.
    pub to: Participant,
    /// The message body.
    pub text: MessageText,
    /// The creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl MessageView {
    /// Denormalises a message using the supplied directory entries.
    #[must_use]
    pub fn from_message(
        message: &Message,
        sender: Option<&User>,
        recipient: Option<&User>,
    ) -> Self {
        Self {
            id: message.id(),
            from: Participant::resolve(message.sender(), sender),
            to: Participant::resolve(message.recipient(), recipient),
            text: message.text().clone(),
            created_at: message.created_at(),
        }
    }
}

impl Participants for MessageView {
    fn sender_id(&self) -> UserId {
        self.from.id
    }

    fn recipient_id(&self) -> UserId {
        self.to.id
    }
}

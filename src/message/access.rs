//! Message visibility rules.
//!
//! A caller may only observe messages they sent or received. Listing is
//! scoped by building a [`MessageQuery`] that stores execute; single reads are
//! checked with [`can_view`] after the fetch.

use crate::message::domain::Participants;
use crate::user::domain::UserId;

/// A declarative, caller-scoped message selection.
///
/// Stores return matching messages in insertion order.
///
/// # Filter asymmetry
///
/// [`MessageQuery::SentTo`] narrows to messages the caller *sent* to the
/// given recipient. It does not include messages received from that user, so
/// it is not a two-way conversation view. Callers relying on the unfiltered
/// listing see both directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageQuery {
    /// Messages where the user is the sender or the recipient.
    Participant(UserId),
    /// Messages sent by `from` to `to`.
    SentTo {
        /// The caller, as sender.
        from: UserId,
        /// The recipient filter.
        to: UserId,
    },
}

impl MessageQuery {
    /// Returns `true` if `message` is selected by this query.
    #[must_use]
    pub fn matches(&self, message: &impl Participants) -> bool {
        match *self {
            Self::Participant(user) => {
                message.sender_id() == user || message.recipient_id() == user
            }
            Self::SentTo { from, to } => {
                message.sender_id() == from && message.recipient_id() == to
            }
        }
    }
}

/// Builds the list query for `caller`, optionally filtered by recipient.
///
/// # Examples
///
/// ```
/// use sup::message::access::{MessageQuery, scope_list_query};
/// use sup::user::domain::UserId;
///
/// let caller = UserId::new();
/// let bob = UserId::new();
/// assert_eq!(scope_list_query(caller, None), MessageQuery::Participant(caller));
/// assert_eq!(
///     scope_list_query(caller, Some(bob)),
///     MessageQuery::SentTo { from: caller, to: bob },
/// );
/// ```
#[must_use]
pub const fn scope_list_query(caller: UserId, to_filter: Option<UserId>) -> MessageQuery {
    match to_filter {
        None => MessageQuery::Participant(caller),
        Some(to) => MessageQuery::SentTo { from: caller, to },
    }
}

/// Returns `true` iff `caller` sent or received `message`.
#[must_use]
pub fn can_view(caller: UserId, message: &impl Participants) -> bool {
    MessageQuery::Participant(caller).matches(message)
}

//! Domain types for direct messages.

mod error;
mod ids;
mod message;

pub use error::MessageDomainError;
pub use ids::MessageId;
pub use message::{Message, MessageText, MessageView, Participant, Participants};

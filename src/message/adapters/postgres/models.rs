//! Diesel row models for message persistence.

use super::schema::messages;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::sql_types::{Nullable, Text, Timestamptz, Uuid as SqlUuid, Varchar};

/// Insert model for message records.
///
/// `position` is assigned by the database sequence.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = messages)]
pub struct NewMessageRow {
    /// Internal message identifier.
    pub id: uuid::Uuid,
    /// Sending user.
    pub sender_id: uuid::Uuid,
    /// Receiving user.
    pub recipient_id: uuid::Uuid,
    /// Message body.
    pub text: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// A message joined with both participants' usernames.
#[derive(Debug, Clone, QueryableByName)]
pub struct MessageViewRow {
    /// Internal message identifier.
    #[diesel(sql_type = SqlUuid)]
    pub id: uuid::Uuid,
    /// Sending user.
    #[diesel(sql_type = SqlUuid)]
    pub sender_id: uuid::Uuid,
    /// Sender's username, absent when the user row is gone.
    #[diesel(sql_type = Nullable<Varchar>)]
    pub sender_username: Option<String>,
    /// Receiving user.
    #[diesel(sql_type = SqlUuid)]
    pub recipient_id: uuid::Uuid,
    /// Recipient's username, absent when the user row is gone.
    #[diesel(sql_type = Nullable<Varchar>)]
    pub recipient_username: Option<String>,
    /// Message body.
    #[diesel(sql_type = Text)]
    pub text: String,
    /// Creation timestamp.
    #[diesel(sql_type = Timestamptz)]
    pub created_at: DateTime<Utc>,
}

//! `PostgreSQL` repository implementation for message storage.

use super::{
    models::{MessageViewRow, NewMessageRow},
    schema::messages,
};
use crate::db::PgPool;
use crate::message::{
    access::MessageQuery,
    domain::{Message, MessageId, MessageText, MessageView, Participant},
    ports::{MessageStore, MessageStoreError, MessageStoreResult},
};
use crate::user::domain::{UserId, Username};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::sql_types::Uuid as SqlUuid;

macro_rules! view_query {
    ($filter:literal) => {
        concat!(
            "SELECT m.id, m.sender_id, s.username AS sender_username, ",
            "m.recipient_id, r.username AS recipient_username, m.text, m.created_at ",
            "FROM messages m ",
            "LEFT JOIN users s ON s.id = m.sender_id ",
            "LEFT JOIN users r ON r.id = m.recipient_id ",
            "WHERE ",
            $filter,
            " ORDER BY m.position",
        )
    };
}

/// `PostgreSQL`-backed message store.
#[derive(Debug, Clone)]
pub struct PostgresMessageStore {
    pool: PgPool,
}

impl PostgresMessageStore {
    /// Creates a new store from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> MessageStoreResult<T>
    where
        F: FnOnce(&mut PgConnection) -> MessageStoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(MessageStoreError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(MessageStoreError::persistence)?
    }
}

#[async_trait]
impl MessageStore for PostgresMessageStore {
    async fn create(&self, message: &Message) -> MessageStoreResult<()> {
        let message_id = message.id();
        let new_row = to_new_row(message);

        self.run_blocking(move |connection| {
            diesel::insert_into(messages::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        MessageStoreError::DuplicateMessage(message_id)
                    }
                    _ => MessageStoreError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: MessageId) -> MessageStoreResult<Option<MessageView>> {
        self.run_blocking(move |connection| {
            let row = diesel::sql_query(view_query!("m.id = $1"))
                .bind::<SqlUuid, _>(id.into_inner())
                .get_result::<MessageViewRow>(connection)
                .optional()
                .map_err(MessageStoreError::persistence)?;
            row.map(row_to_view).transpose()
        })
        .await
    }

    async fn find(&self, query: &MessageQuery) -> MessageStoreResult<Vec<MessageView>> {
        let scoped = *query;
        self.run_blocking(move |connection| {
            let rows = match scoped {
                MessageQuery::Participant(user) => {
                    diesel::sql_query(view_query!("m.sender_id = $1 OR m.recipient_id = $1"))
                        .bind::<SqlUuid, _>(user.into_inner())
                        .load::<MessageViewRow>(connection)
                }
                MessageQuery::SentTo { from, to } => {
                    diesel::sql_query(view_query!("m.sender_id = $1 AND m.recipient_id = $2"))
                        .bind::<SqlUuid, _>(from.into_inner())
                        .bind::<SqlUuid, _>(to.into_inner())
                        .load::<MessageViewRow>(connection)
                }
            }
            .map_err(MessageStoreError::persistence)?;
            rows.into_iter().map(row_to_view).collect()
        })
        .await
    }
}

fn to_new_row(message: &Message) -> NewMessageRow {
    NewMessageRow {
        id: message.id().into_inner(),
        sender_id: message.sender().into_inner(),
        recipient_id: message.recipient().into_inner(),
        text: message.text().as_str().to_owned(),
        created_at: message.created_at(),
    }
}

fn row_to_view(row: MessageViewRow) -> MessageStoreResult<MessageView> {
    let MessageViewRow {
        id,
        sender_id,
        sender_username,
        recipient_id,
        recipient_username,
        text,
        created_at,
    } = row;

    Ok(MessageView {
        id: MessageId::from_uuid(id),
        from: participant(sender_id, sender_username)?,
        to: participant(recipient_id, recipient_username)?,
        text: MessageText::new(text).map_err(MessageStoreError::persistence)?,
        created_at,
    })
}

fn participant(id: uuid::Uuid, raw_username: Option<String>) -> MessageStoreResult<Participant> {
    let username = raw_username
        .map(Username::new)
        .transpose()
        .map_err(MessageStoreError::persistence)?;
    Ok(Participant {
        id: UserId::from_uuid(id),
        username,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockable::DefaultClock;
    use rstest::rstest;

    fn view_row(text: &str, sender_username: Option<&str>) -> MessageViewRow {
        MessageViewRow {
            id: uuid::Uuid::new_v4(),
            sender_id: uuid::Uuid::new_v4(),
            sender_username: sender_username.map(str::to_owned),
            recipient_id: uuid::Uuid::new_v4(),
            recipient_username: Some("bob".to_owned()),
            text: text.to_owned(),
            created_at: chrono::Utc::now(),
        }
    }

    #[rstest]
    fn new_row_carries_participants() {
        let sender = UserId::new();
        let recipient = UserId::new();
        let message = Message::new(
            sender,
            recipient,
            MessageText::new("Hi Bob").expect("non-empty"),
            &DefaultClock,
        );

        let row = to_new_row(&message);

        assert_eq!(row.id, message.id().into_inner());
        assert_eq!(row.sender_id, sender.into_inner());
        assert_eq!(row.recipient_id, recipient.into_inner());
        assert_eq!(row.text, "Hi Bob");
    }

    #[rstest]
    #[case(Some("alice"))]
    #[case(None)]
    fn view_row_converts_optional_usernames(#[case] sender_username: Option<&str>) {
        let row = view_row("hi", sender_username);
        let sender_id = row.sender_id;

        let view = row_to_view(row).expect("row should convert");

        assert_eq!(view.from.id.into_inner(), sender_id);
        assert_eq!(
            view.from.username.as_ref().map(Username::as_str),
            sender_username
        );
        assert_eq!(view.to.username.as_ref().map(Username::as_str), Some("bob"));
    }

    #[rstest]
    fn empty_persisted_text_is_a_persistence_fault() {
        let result = row_to_view(view_row("", Some("alice")));
        assert!(matches!(result, Err(MessageStoreError::Persistence(_))));
    }

    #[rstest]
    fn list_queries_order_by_insertion_position() {
        let sql = view_query!("m.sender_id = $1 OR m.recipient_id = $1");
        assert!(sql.ends_with("ORDER BY m.position"));
        assert!(sql.contains("LEFT JOIN users s ON s.id = m.sender_id"));
    }
}

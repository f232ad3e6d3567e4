//! Diesel schema for message persistence.

diesel::table! {
    /// Direct messages between two users.
    messages (id) {
        /// Internal message identifier.
        id -> Uuid,
        /// Insertion position used for stable list ordering.
        position -> Int8,
        /// Sending user.
        sender_id -> Uuid,
        /// Receiving user.
        recipient_id -> Uuid,
        /// Message body.
        text -> Text,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

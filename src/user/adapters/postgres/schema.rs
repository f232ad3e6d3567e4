//! Diesel schema for user persistence.

diesel::table! {
    /// Registered users and their password hashes.
    users (id) {
        /// Internal user identifier.
        id -> Uuid,
        /// Unique login name.
        #[max_length = 255]
        username -> Varchar,
        /// Password hash in modular crypt format.
        password_hash -> Text,
        /// Registration timestamp.
        created_at -> Timestamptz,
    }
}

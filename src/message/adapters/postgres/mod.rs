//! `PostgreSQL` adapters for message persistence.

mod models;
mod repository;
mod schema;

pub use repository::PostgresMessageStore;

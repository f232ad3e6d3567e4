//! `PostgreSQL` connection pooling and schema bootstrap.

use diesel::PgConnection;
use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use std::sync::Arc;
use thiserror::Error;

/// `PostgreSQL` connection pool shared by the user and message stores.
pub type PgPool = Pool<ConnectionManager<PgConnection>>;

const SCHEMA: &str =
    include_str!("../migrations/2026-10-19-000000_create_users_and_messages/up.sql");

/// Errors raised while connecting to the database.
#[derive(Debug, Clone, Error)]
pub enum DatabaseError {
    /// The pool could not be built.
    #[error("failed to build connection pool: {0}")]
    Pool(Arc<dyn std::error::Error + Send + Sync>),

    /// The schema could not be applied.
    #[error("failed to apply schema: {0}")]
    Schema(Arc<dyn std::error::Error + Send + Sync>),
}

/// Builds a connection pool for `database_url`.
///
/// Blocks until the pool has established its initial connections.
///
/// # Errors
///
/// Returns [`DatabaseError::Pool`] when the database is unreachable.
pub fn connect(database_url: &str) -> Result<PgPool, DatabaseError> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    Pool::builder()
        .build(manager)
        .map_err(|err| DatabaseError::Pool(Arc::new(err)))
}

/// Creates the `users` and `messages` tables if they do not exist.
///
/// # Errors
///
/// Returns [`DatabaseError`] when no connection is available or the DDL
/// fails.
pub fn apply_schema(pool: &PgPool) -> Result<(), DatabaseError> {
    let mut connection = pool
        .get()
        .map_err(|err| DatabaseError::Pool(Arc::new(err)))?;
    connection
        .batch_execute(SCHEMA)
        .map_err(|err| DatabaseError::Schema(Arc::new(err)))
}

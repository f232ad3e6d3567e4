//! Application assembly: adapter selection and router construction.

use std::sync::Arc;

use axum::Router;
use mockable::DefaultClock;
use thiserror::Error;

use crate::auth::DirectoryAuthenticator;
use crate::config::ServerConfig;
use crate::db::{self, DatabaseError, PgPool};
use crate::http::{self, AppState, Backend, cors::cors_layer};
use crate::message::{
    adapters::{memory::InMemoryMessageStore, postgres::PostgresMessageStore},
    services::MessagingService,
};
use crate::user::{
    adapters::{
        bcrypt::BcryptPasswordHasher, memory::InMemoryUserDirectory,
        postgres::PostgresUserDirectory,
    },
    services::UserService,
};

/// Process-local storage; state is lost on restart.
#[derive(Debug, Clone, Copy)]
pub struct InMemoryBackend;

impl Backend for InMemoryBackend {
    type Store = InMemoryMessageStore<InMemoryUserDirectory>;
    type Directory = InMemoryUserDirectory;
    type Hasher = BcryptPasswordHasher;
    type Clock = DefaultClock;
}

/// `PostgreSQL` storage through a shared connection pool.
#[derive(Debug, Clone, Copy)]
pub struct PostgresBackend;

impl Backend for PostgresBackend {
    type Store = PostgresMessageStore;
    type Directory = PostgresUserDirectory;
    type Hasher = BcryptPasswordHasher;
    type Clock = DefaultClock;
}

/// Errors raised while assembling the application.
#[derive(Debug, Error)]
pub enum AppError {
    /// The database could not be prepared.
    #[error(transparent)]
    Database(#[from] DatabaseError),
}

/// Builds handler state over in-memory adapters.
#[must_use]
pub fn in_memory_state(bcrypt_cost: u32) -> AppState<InMemoryBackend> {
    let directory = Arc::new(InMemoryUserDirectory::new());
    let store = Arc::new(InMemoryMessageStore::new(Arc::clone(&directory)));
    assemble::<InMemoryBackend>(store, directory, bcrypt_cost)
}

/// Builds handler state over `PostgreSQL` adapters sharing `pool`.
#[must_use]
pub fn postgres_state(pool: &PgPool, bcrypt_cost: u32) -> AppState<PostgresBackend> {
    let directory = Arc::new(PostgresUserDirectory::new(pool.clone()));
    let store = Arc::new(PostgresMessageStore::new(pool.clone()));
    assemble::<PostgresBackend>(store, directory, bcrypt_cost)
}

fn assemble<B>(store: Arc<B::Store>, directory: Arc<B::Directory>, bcrypt_cost: u32) -> AppState<B>
where
    B: Backend<Hasher = BcryptPasswordHasher, Clock = DefaultClock>,
{
    let hasher = Arc::new(BcryptPasswordHasher::new(bcrypt_cost));
    let clock = Arc::new(DefaultClock);
    let authenticator = Arc::new(DirectoryAuthenticator::new(
        Arc::clone(&directory),
        Arc::clone(&hasher),
    ));
    AppState::new(
        MessagingService::new(store, Arc::clone(&directory), Arc::clone(&clock)),
        UserService::new(directory, hasher, clock),
        authenticator,
    )
}

/// Builds the router selected by `config`.
///
/// With a `DATABASE_URL` this connects, applies the schema and serves from
/// `PostgreSQL`; otherwise it serves from memory. Connecting blocks, so call
/// this from a blocking context.
///
/// # Errors
///
/// Returns [`AppError::Database`] when the database cannot be prepared.
pub fn build_router(config: &ServerConfig) -> Result<Router, AppError> {
    let cors = cors_layer(config.environment, &config.cors_allowed_origins);
    match config.database_url.as_deref() {
        Some(url) => {
            let pool = db::connect(url)?;
            db::apply_schema(&pool)?;
            tracing::info!("using PostgreSQL storage");
            Ok(http::router(postgres_state(&pool, config.bcrypt_cost), cors))
        }
        None => {
            tracing::warn!("DATABASE_URL not set; using in-memory storage");
            Ok(http::router(in_memory_state(config.bcrypt_cost), cors))
        }
    }
}

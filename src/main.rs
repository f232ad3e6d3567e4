//! `sup-server`: serves the direct-messaging API.
//!
//! Configuration is read from the environment (see
//! [`sup::config::ServerConfig::from_lookup`]). Without `DATABASE_URL` the
//! server keeps all state in memory.

use sup::app::{AppError, build_router};
use sup::config::{ConfigError, ServerConfig};
use sup::telemetry::init_tracing;
use thiserror::Error;

#[derive(Debug, Error)]
enum ServerError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Tracing(#[from] tracing_subscriber::util::TryInitError),
    #[error(transparent)]
    App(#[from] AppError),
    #[error("startup task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
    #[error("server I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() -> Result<(), ServerError> {
    let config = ServerConfig::from_env()?;
    init_tracing(&config.log_filter)?;

    let address = config.bind_address();
    let router = tokio::task::spawn_blocking(move || build_router(&config)).await??;

    let listener = tokio::net::TcpListener::bind(address).await?;
    tracing::info!(%address, "listening");
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}

//! Sup: a minimal direct-messaging backend.
//!
//! Users authenticate with HTTP Basic credentials and exchange text messages.
//! Each message is visible only to its sender and its recipient.
//!
//! # Architecture
//!
//! Sup follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, in-memory)
//!
//! # Modules
//!
//! - [`payload`]: Field-level validation errors shared by request validators
//! - [`user`]: User directory, registration, and password hashing
//! - [`message`]: Message validation, access control, and storage
//! - [`auth`]: Credential parsing and caller authentication
//! - [`http`]: Axum router, extractors, and error translation
//! - [`app`]: Backend assembly for the server binary
//! - [`config`]: Environment-driven server configuration
//! - [`db`]: `PostgreSQL` pool construction and schema bootstrap
//! - [`telemetry`]: Tracing subscriber initialisation

pub mod app;
pub mod auth;
pub mod config;
pub mod db;
pub mod http;
pub mod message;
pub mod payload;
pub mod telemetry;
pub mod user;

//! User registration, lookup and credential storage.
//!
//! Users are the principals that authenticate and exchange messages. This
//! module follows hexagonal architecture:
//!
//! - **Domain**: identifiers, validated usernames and the `User` entity
//! - **Ports**: the `UserDirectory` and `PasswordHasher` abstractions
//! - **Adapters**: in-memory, `PostgreSQL` and `bcrypt` implementations
//! - **Services**: registration and self-edit orchestration

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
pub mod validation;

#[cfg(test)]
mod tests;

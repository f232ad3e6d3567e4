//! Direct messages between registered users.
//!
//! The write path validates a payload, confirms the recipient exists and
//! stores the message with the authenticated caller as sender. The read path
//! scopes every query to messages the caller sent or received.
//!
//! - Domain types in [`domain`]
//! - Payload validation in [`validation`]
//! - Visibility rules in [`access`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod access;
pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
pub mod validation;

#[cfg(test)]
mod tests;

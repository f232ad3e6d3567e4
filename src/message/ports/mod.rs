//! Port trait definitions for the messaging subsystem.

pub mod store;

pub use store::{MessageStore, MessageStoreError, MessageStoreResult};

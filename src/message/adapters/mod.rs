//! Adapter implementations for the messaging subsystem.

pub mod memory;
pub mod postgres;

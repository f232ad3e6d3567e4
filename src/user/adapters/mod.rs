//! Adapter implementations for the user subsystem.

pub mod bcrypt;
pub mod memory;
pub mod postgres;

//! Step definitions for message access scenarios.

mod given;
mod then;
mod when;
pub mod world;

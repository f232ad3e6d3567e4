//! Port trait definitions for the user subsystem.

pub mod directory;
pub mod hasher;

pub use directory::{DirectoryError, DirectoryResult, UserDirectory};
pub use hasher::{HashingError, PasswordHasher};

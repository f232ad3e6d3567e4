//! Domain types for the user directory.

mod error;
mod ids;
mod user;

pub use error::UserDomainError;
pub use ids::UserId;
pub use user::{PasswordHash, User, UserCredentials, Username};

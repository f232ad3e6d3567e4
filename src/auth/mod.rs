//! Caller authentication from HTTP Basic credentials.
//!
//! The HTTP layer hands raw `Authorization` header values to
//! [`Credentials::from_basic_header`] and resolves them through an
//! [`Authenticator`]. Everything downstream receives an [`Identity`] and never
//! sees credentials.

mod authenticator;
mod credentials;

pub use authenticator::{AuthFailure, Authenticator, DirectoryAuthenticator, Identity};
pub use credentials::Credentials;

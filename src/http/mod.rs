//! HTTP surface under `/api/v1`.
//!
//! Handlers authenticate the caller through [`AuthenticatedCaller`], delegate
//! to the user and messaging services, and render failures through
//! [`ApiError`].

pub mod cors;
mod error;
pub mod extract;
pub mod handlers;
mod router;
mod state;

pub use error::{ApiError, BASIC_CHALLENGE};
pub use extract::AuthenticatedCaller;
pub use router::router;
pub use state::{AppState, Backend, BackendMessaging, BackendUsers};

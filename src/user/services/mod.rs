//! Application services for the user directory.

mod registry;

pub use registry::{UserService, UserServiceError, UserServiceResult};

//! Application services for direct messaging.

mod messaging;

pub use messaging::{MessagingError, MessagingResult, MessagingService};

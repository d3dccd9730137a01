use common::ErrorLocation;

use thiserror::Error as ThisError;

/// Misuse of a [`NatsServer`](crate::NatsServer) handle by test code.
///
/// Never returned to the caller. Delivered to the handle's
/// [`FailureReporter`](crate::FailureReporter) instead.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum ServerError {
    #[error("Invalid Port Error: {message} {location}")]
    InvalidPort {
        message: String,
        port: i32,
        location: ErrorLocation,
    },
}

impl ServerError {
    pub fn location(&self) -> ErrorLocation {
        match self {
            ServerError::InvalidPort { location, .. } => *location,
        }
    }
}

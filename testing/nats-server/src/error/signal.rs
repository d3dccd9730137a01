use common::ErrorLocation;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum SignalError {
    #[error("Unknown Signal Error: {message} {location}")]
    Unknown {
        message: String,
        location: ErrorLocation,
    },
}

use common::ErrorLocation;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("Config Invalid Value Error: {variable}={value}: {message} {location}")]
    InvalidValue {
        variable: &'static str,
        value: String,
        message: String,
        location: ErrorLocation,
    },
}

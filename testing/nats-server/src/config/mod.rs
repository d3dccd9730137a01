//! Where the test harness started its nats-server.
//!
//! The harness publishes the server's location through environment
//! variables, optionally via a `.env` file in the working directory:
//!
//! - `NATS_SERVER_PORT`: TCP port the server listens on
//! - `NATS_SERVER_CONFIG`: path of the config file it was started with

use crate::error::ConfigError;

use common::ErrorLocation;

use std::env;
use std::panic::Location;
use std::path::PathBuf;

use log::{debug, trace};

pub const PORT_VARIABLE: &str = "NATS_SERVER_PORT";
pub const CONFIG_FILE_VARIABLE: &str = "NATS_SERVER_CONFIG";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HarnessConfig {
    pub port: Option<i32>,
    pub config_file: Option<PathBuf>,
}

impl HarnessConfig {
    pub fn new(port: i32) -> Self {
        Self {
            port: Some(port),
            config_file: None,
        }
    }

    pub fn with_config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    /// Read the harness configuration from the process environment.
    ///
    /// A `.env` file is loaded first when one exists. Unset or blank
    /// variables leave the matching field as `None`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if `NATS_SERVER_PORT` is not an integer.
    #[track_caller]
    pub fn from_env() -> Result<Self, ConfigError> {
        match dotenvy::dotenv() {
            Ok(path) => debug!("Loaded harness environment from {}", path.display()),
            Err(e) => trace!("No .env file loaded: {e}"),
        }

        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    #[track_caller]
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let location = ErrorLocation::from(Location::caller());
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let port = match read(PORT_VARIABLE) {
            Some(value) => Some(value.parse::<i32>().map_err(|e| ConfigError::InvalidValue {
                variable: PORT_VARIABLE,
                value: value.clone(),
                message: format!("Expected an integer port: {e}"),
                location,
            })?),
            None => None,
        };

        let config_file = read(CONFIG_FILE_VARIABLE).map(PathBuf::from);

        Ok(Self { port, config_file })
    }
}

use crate::error::SignalError;

use common::ErrorLocation;

use std::fmt::{Display, Formatter, Result as FormatResult};
use std::panic::Location;
use std::str::FromStr;

const LAME_DUCK_MODE_NAME: &str = "ldm";
const RELOAD_NAME: &str = "reload";

/// Administrative actions nats-server accepts through `nats-server --signal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signal {
    /// Stop accepting connections and drain existing clients.
    LameDuckMode,
    /// Re-read the server configuration file.
    Reload,
}

impl Signal {
    pub const ALL: [Signal; 2] = [Signal::LameDuckMode, Signal::Reload];

    /// Name nats-server uses for this signal on its command line.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Signal::LameDuckMode => LAME_DUCK_MODE_NAME,
            Signal::Reload => RELOAD_NAME,
        }
    }

    /// Look up a signal by its nats-server name.
    ///
    /// # Errors
    ///
    /// Returns [`SignalError::Unknown`], located at the caller, for any other name.
    #[track_caller]
    pub fn from_name(name: &str) -> Result<Self, SignalError> {
        match name {
            LAME_DUCK_MODE_NAME => Ok(Signal::LameDuckMode),
            RELOAD_NAME => Ok(Signal::Reload),
            other => Err(SignalError::Unknown {
                message: format!(
                    "'{other}' is not a nats-server signal (expected '{LAME_DUCK_MODE_NAME}' or '{RELOAD_NAME}')"
                ),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }
}

impl Display for Signal {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> FormatResult {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for Signal {
    type Err = SignalError;

    /// Parses through [`Signal::from_name`]. Errors raised via `str::parse`
    /// carry a location inside `core`; call `from_name` directly when the
    /// call site matters.
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Signal::from_name(name)
    }
}

//! Connection state of an externally managed nats-server used by a test.
//!
//! [`NatsServer`] does not launch anything. The surrounding harness (a CI job
//! or a developer's terminal) is expected to have a server
//! listening on `localhost:<port>` already. The handle records that port and
//! turns it into client URLs:
//!
//! ```
//! use nats_server::NatsServer;
//!
//! let mut server = NatsServer::new();
//! server.start(4222, None);
//! assert_eq!(server.client_url(), "nats://localhost:4222");
//! assert_eq!(server.client_websocket_url(), "");
//!
//! server.stop();
//! assert_eq!(server.client_url(), "");
//! ```
//!
//! # State
//!
//! A handle is either unbound (no port) or bound to one port. `start` binds or
//! rebinds, `stop` and `Drop` unbind. There is no separate running flag.
//!
//! The websocket port and TLS flag are part of the state but no operation
//! sets them yet. Both URL accessors already honor them.
//!
//! # Misuse
//!
//! `start` with a port that is not strictly positive is a mistake in the test,
//! not a runtime condition. The handle reports it to its
//! [`FailureReporter`] with the caller's location and leaves its state alone.
//!
//! # Threading
//!
//! Mutation needs `&mut self`. A handle is meant to be owned by a single test;
//! sharing one between tests requires the caller's own synchronization.

pub mod signal;

pub use signal::Signal;

use crate::config::HarnessConfig;
use crate::error::ServerError;
use crate::reporter::{DeferredReporter, FailureReporter};
use crate::{NATS_URL_PREFIX, TLS_URL_PREFIX, WS_URL_PREFIX, WSS_URL_PREFIX};

use common::ErrorLocation;

use std::fmt::{Debug, Formatter, Result as FormatResult};
use std::num::NonZeroU32;
use std::panic::Location;
use std::path::Path;
use std::sync::Arc;

use log::{debug, trace};

/// Port `start_with_config` falls back to when the harness names none.
///
/// Not a valid port, so a missing port is reported like any other bad port.
pub const DEFAULT_PORT: i32 = -1;

const INVALID_PORT_MESSAGE: &str =
    "Provide a positive port to connect to an already-running nats-server.";

pub struct NatsServer {
    port: Option<NonZeroU32>,
    websocket_port: Option<NonZeroU32>,
    tls_enabled: bool,
    reporter: Arc<dyn FailureReporter>,
}

impl NatsServer {
    /// Create an unbound handle that reports misuse through a [`DeferredReporter`].
    pub fn new() -> Self {
        Self::with_reporter(DeferredReporter::new())
    }

    /// Create an unbound handle that reports misuse through `reporter`.
    pub fn with_reporter(reporter: impl FailureReporter + 'static) -> Self {
        Self::with_shared_reporter(Arc::new(reporter))
    }

    /// Create an unbound handle that shares `reporter` with other handles.
    pub fn with_shared_reporter(reporter: Arc<dyn FailureReporter>) -> Self {
        Self {
            port: None,
            websocket_port: None,
            tls_enabled: false,
            reporter,
        }
    }

    /// Bind the handle to a server already listening on `localhost:port`.
    ///
    /// `cfg` names the configuration file the harness started the server
    /// with. It is accepted for forward compatibility and does not influence
    /// the derived URLs.
    ///
    /// A port that is not strictly positive is reported against the caller's
    /// location and the handle is left as it was.
    #[track_caller]
    pub fn start(&mut self, port: i32, cfg: Option<&Path>) {
        self.start_at(port, cfg, ErrorLocation::from(Location::caller()));
    }

    /// [`start`](Self::start) with an explicit call site for failure attribution.
    pub fn start_at(&mut self, port: i32, cfg: Option<&Path>, location: ErrorLocation) {
        let Some(bound) = u32::try_from(port).ok().and_then(NonZeroU32::new) else {
            self.reporter.report_failure(&ServerError::InvalidPort {
                message: INVALID_PORT_MESSAGE.to_string(),
                port,
                location,
            });
            return;
        };

        if let Some(cfg) = cfg {
            trace!("Ignoring server config {} for URL derivation", cfg.display());
        }

        self.port = Some(bound);
        self.websocket_port = None;
        self.tls_enabled = false;

        debug!("Bound to nats-server on port {bound} {location}");
    }

    /// Bind using the port and config file the harness published.
    ///
    /// A harness that named no port is reported as [`DEFAULT_PORT`].
    #[track_caller]
    pub fn start_with_config(&mut self, config: &HarnessConfig) {
        self.start_at(
            config.port.unwrap_or(DEFAULT_PORT),
            config.config_file.as_deref(),
            ErrorLocation::from(Location::caller()),
        );
    }

    /// Return the handle to the unbound state. Safe to call repeatedly.
    pub fn stop(&mut self) {
        if let Some(port) = self.port {
            debug!("Unbound from nats-server on port {port}");
        }

        self.port = None;
        self.websocket_port = None;
        self.tls_enabled = false;
    }

    /// Request an administrative action from the server.
    ///
    /// The handle does not own the server process, so nothing is delivered.
    /// The state and derived URLs are unaffected.
    #[track_caller]
    pub fn send_signal(&self, signal: Signal) {
        self.send_signal_at(signal, ErrorLocation::from(Location::caller()));
    }

    /// [`send_signal`](Self::send_signal) with an explicit call site.
    pub fn send_signal_at(&self, signal: Signal, location: ErrorLocation) {
        debug!("Signal '{signal}' not delivered: no managed nats-server process {location}");
    }

    pub fn port(&self) -> Option<u32> {
        self.port.map(NonZeroU32::get)
    }

    pub fn websocket_port(&self) -> Option<u32> {
        self.websocket_port.map(NonZeroU32::get)
    }

    pub fn tls_enabled(&self) -> bool {
        self.tls_enabled
    }

    pub fn is_bound(&self) -> bool {
        self.port.is_some()
    }

    /// `nats://localhost:<port>` (`tls://` when TLS is enabled), or `""` when unbound.
    pub fn client_url(&self) -> String {
        let prefix = if self.tls_enabled {
            TLS_URL_PREFIX
        } else {
            NATS_URL_PREFIX
        };

        self.port
            .map(|port| format!("{prefix}{port}"))
            .unwrap_or_default()
    }

    /// `ws://localhost:<port>` (`wss://` when TLS is enabled), or `""` without a websocket port.
    pub fn client_websocket_url(&self) -> String {
        let prefix = if self.tls_enabled {
            WSS_URL_PREFIX
        } else {
            WS_URL_PREFIX
        };

        self.websocket_port
            .map(|port| format!("{prefix}{port}"))
            .unwrap_or_default()
    }

    #[cfg(test)]
    pub(crate) fn set_transport(&mut self, websocket_port: Option<NonZeroU32>, tls_enabled: bool) {
        self.websocket_port = websocket_port;
        self.tls_enabled = tls_enabled;
    }
}

impl Default for NatsServer {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for NatsServer {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> FormatResult {
        formatter
            .debug_struct("NatsServer")
            .field("port", &self.port)
            .field("websocket_port", &self.websocket_port)
            .field("tls_enabled", &self.tls_enabled)
            .finish_non_exhaustive()
    }
}

impl Drop for NatsServer {
    fn drop(&mut self) {
        self.stop();
    }
}
